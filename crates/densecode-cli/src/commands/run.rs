//! Run command implementation.

use anyhow::Result;
use console::style;

use densecode_protocol::{plot, report};

use super::common::{RunSettings, print_saved, protocol_for};

/// Execute the run command.
pub async fn execute(settings: &RunSettings) -> Result<()> {
    let config = &settings.config;
    let mut sdc = protocol_for(config, config.error_angle_deg)?
        .with_reports(settings.message.is_none());

    if let Some(bits) = settings.message.as_deref() {
        println!(
            "{} Sending {} with {:.2}° gate error ({} shots)",
            style("→").cyan().bold(),
            style(bits).green(),
            config.error_angle_deg,
            config.shots
        );
        let record = sdc.run_protocol(bits, config.shots).await?;
        report::print_run(&record);
        return Ok(());
    }

    let records = sdc.test_all_cases(config.shots).await?;
    report::print_summary(&records, sdc.error_angle_deg());

    if config.save_plots {
        if let Some(path) =
            plot::save_results_grid(&config.output_dir, sdc.results(), sdc.error_angle_deg())?
        {
            print_saved("Results visualization", &path);
        }
    }

    Ok(())
}
