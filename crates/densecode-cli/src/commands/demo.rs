//! The default demonstration.

use anyhow::Result;
use console::style;
use tracing::info;

use densecode_protocol::{SuperdenseConfig, plot, report};

use super::common::{print_saved, protocol_for};

/// Run every message at the configured angle, then sweep the angle.
pub async fn execute(config: &SuperdenseConfig) -> Result<()> {
    report::print_header("SUPERDENSE CODING WITH IMPERFECT GATES - DEMONSTRATION");
    println!("\nSimulating systematic gate errors:");
    println!("  • Depolarizing noise on every gate");
    println!("  • Amplitude damping (energy loss) on single-qubit gates\n");

    println!(
        "\n{} Testing with {}° gate error...",
        style("[1]").cyan().bold(),
        config.error_angle_deg
    );
    let mut sdc = protocol_for(config, config.error_angle_deg)?;
    let records = sdc.test_all_cases(config.shots).await?;
    report::print_summary(&records, sdc.error_angle_deg());

    if config.save_plots {
        if let Some(path) =
            plot::save_results_grid(&config.output_dir, sdc.results(), sdc.error_angle_deg())?
        {
            print_saved("Results visualization", &path);
        }
    }

    println!(
        "\n{} Comparing different gate error angles...",
        style("[2]").cyan().bold()
    );
    let message = config.sweep_message()?;
    let points = sdc
        .compare_gate_errors(message.as_str(), &config.sweep_angles_deg, config.shots)
        .await?;
    info!(points = points.len(), "sweep complete");
    println!();
    report::print_comparison(message, &points);

    if config.save_plots {
        let path = plot::save_comparison(&config.output_dir, &points, message)?;
        print_saved("Comparison visualization", &path);
    }

    report::print_success("Imperfect gates demonstration completed!");
    Ok(())
}
