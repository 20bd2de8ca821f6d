//! Shared options and helpers for CLI commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use densecode_protocol::{SuperdenseCoding, SuperdenseConfig};

/// Flags shared by `run` and `sweep`.
#[derive(Args, Debug, Default)]
pub struct CommonOptions {
    /// Number of shots per run
    #[arg(short, long)]
    pub shots: Option<u32>,

    /// Seed for reproducible sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory for SVG plots
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Skip writing SVG plots
    #[arg(long)]
    pub no_plots: bool,
}

impl CommonOptions {
    fn apply(&self, config: &mut SuperdenseConfig) {
        if let Some(shots) = self.shots {
            config.shots = shots;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir.clone_from(dir);
        }
        if self.no_plots {
            config.save_plots = false;
        }
    }
}

/// Flags for `run`.
#[derive(Args, Debug, Default)]
pub struct RunOptions {
    /// Two-bit message to send (all four when omitted)
    #[arg(short, long)]
    pub message: Option<String>,

    /// Gate-error angle in degrees
    #[arg(short, long)]
    pub angle: Option<f64>,

    /// Do not print circuit diagrams
    #[arg(long)]
    pub no_draw: bool,

    #[command(flatten)]
    pub common: CommonOptions,
}

/// A validated configuration plus the single message to run, if any.
#[derive(Debug)]
pub struct RunSettings {
    pub config: SuperdenseConfig,
    pub message: Option<String>,
}

impl RunOptions {
    /// Layer these flags over `config`.
    pub fn apply(self, mut config: SuperdenseConfig) -> Result<RunSettings> {
        self.common.apply(&mut config);
        if let Some(angle) = self.angle {
            config.error_angle_deg = angle;
        }
        if self.no_draw {
            config.draw_circuits = false;
        }
        config.validate()?;
        Ok(RunSettings {
            config,
            message: self.message,
        })
    }
}

/// Flags for `sweep`.
#[derive(Args, Debug, Default)]
pub struct SweepOptions {
    /// Two-bit message to send
    #[arg(short, long)]
    pub message: Option<String>,

    /// Comma-separated gate-error angles in degrees
    #[arg(long, value_delimiter = ',')]
    pub angles: Option<Vec<f64>>,

    #[command(flatten)]
    pub common: CommonOptions,
}

impl SweepOptions {
    /// Layer these flags over `config`.
    pub fn apply(self, mut config: SuperdenseConfig) -> Result<SuperdenseConfig> {
        self.common.apply(&mut config);
        if let Some(message) = self.message {
            config.sweep_message = message;
        }
        if let Some(angles) = self.angles {
            config.sweep_angles_deg = angles;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Build a protocol runner for `angle_deg` honouring the config's seed and
/// drawing settings.
pub fn protocol_for(config: &SuperdenseConfig, angle_deg: f64) -> Result<SuperdenseCoding> {
    let mut sdc = SuperdenseCoding::from_degrees(angle_deg)
        .with_context(|| format!("Invalid gate-error angle: {angle_deg}°"))?
        .with_circuit_drawing(config.draw_circuits);
    if let Some(seed) = config.seed {
        sdc = sdc.with_seed(seed);
    }
    Ok(sdc)
}

/// Create a progress bar for sweeps.
pub fn create_progress_bar(len: u64, message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .context("Invalid progress bar template")?
        .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    Ok(pb)
}

/// Report a written artifact.
pub fn print_saved(what: &str, path: &Path) {
    println!(
        "\n{} {what} saved as '{}'",
        style("✓").green().bold(),
        path.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_flags_override_config() {
        let options = RunOptions {
            message: Some("01".to_string()),
            angle: Some(1.5),
            no_draw: true,
            common: CommonOptions {
                shots: Some(64),
                seed: Some(3),
                output_dir: Some(PathBuf::from("out")),
                no_plots: true,
            },
        };
        let settings = options.apply(SuperdenseConfig::default()).unwrap();
        assert_eq!(settings.message.as_deref(), Some("01"));
        assert_eq!(settings.config.error_angle_deg, 1.5);
        assert_eq!(settings.config.shots, 64);
        assert_eq!(settings.config.seed, Some(3));
        assert_eq!(settings.config.output_dir, PathBuf::from("out"));
        assert!(!settings.config.draw_circuits);
        assert!(!settings.config.save_plots);
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let config = SuperdenseConfig {
            shots: 99,
            ..Default::default()
        };
        let settings = RunOptions::default().apply(config.clone()).unwrap();
        assert_eq!(settings.config, config);
        assert!(settings.message.is_none());
    }

    #[test]
    fn test_invalid_override_rejected() {
        let options = SweepOptions {
            angles: Some(vec![1.0, -3.0]),
            ..Default::default()
        };
        assert!(options.apply(SuperdenseConfig::default()).is_err());

        let options = SweepOptions {
            message: Some("2".to_string()),
            ..Default::default()
        };
        assert!(options.apply(SuperdenseConfig::default()).is_err());
    }

    #[test]
    fn test_protocol_for_uses_angle() {
        let config = SuperdenseConfig::default();
        let sdc = protocol_for(&config, 10.0).unwrap();
        assert!((sdc.error_angle_deg() - 10.0).abs() < 1e-9);
        assert!(protocol_for(&config, -1.0).is_err());
    }

    #[test]
    fn test_progress_bar_template() {
        let pb = create_progress_bar(6, "sweep").unwrap();
        assert_eq!(pb.length(), Some(6));
    }
}
