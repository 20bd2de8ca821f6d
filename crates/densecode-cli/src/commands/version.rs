//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - superdense coding under imperfect gates",
        style("densecode").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  densecode-ir           Circuit IR, noise channels, text drawing");
    println!("  densecode-hal          Backend abstraction layer");
    println!("  densecode-adapter-sim  Density-matrix simulator");
    println!("  densecode-protocol     Protocol, reports and plots");
    println!("  densecode-cli          Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
