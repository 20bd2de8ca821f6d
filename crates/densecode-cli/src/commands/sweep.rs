//! Sweep command implementation.

use anyhow::Result;

use densecode_protocol::{SuperdenseConfig, plot, report};

use super::common::{create_progress_bar, print_saved, protocol_for};

/// Execute the sweep command.
pub async fn execute(config: &SuperdenseConfig) -> Result<()> {
    let message = config.sweep_message()?;
    let sdc = protocol_for(config, 0.0)?.quiet();

    let pb = create_progress_bar(config.sweep_angles_deg.len() as u64, "sweeping")?;
    let points = sdc
        .compare_gate_errors_with(
            message.as_str(),
            &config.sweep_angles_deg,
            config.shots,
            |point| {
                pb.set_message(format!("{}° done", point.angle_deg));
                pb.inc(1);
            },
        )
        .await?;
    pb.finish_and_clear();

    report::print_comparison(message, &points);

    if config.save_plots {
        let path = plot::save_comparison(&config.output_dir, &points, message)?;
        print_saved("Comparison visualization", &path);
    }

    Ok(())
}
