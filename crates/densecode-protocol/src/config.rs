//! Run configuration.
//!
//! Values come from, lowest precedence first:
//! 1. Built-in defaults
//! 2. A YAML file
//! 3. Environment variables with the `DENSECODE_` prefix
//!
//! Command-line flags are applied on top by the binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, ProtocolResult};
use crate::message::Message;

/// Settings for a demonstration run and its gate-error sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuperdenseConfig {
    /// Gate-error angle for the all-messages run, in degrees.
    #[serde(default = "default_error_angle_deg")]
    pub error_angle_deg: f64,

    /// Shots per protocol run.
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// Message used by the sweep.
    #[serde(default = "default_sweep_message")]
    pub sweep_message: String,

    /// Angles visited by the sweep, in degrees.
    #[serde(default = "default_sweep_angles_deg")]
    pub sweep_angles_deg: Vec<f64>,

    /// Directory the SVG plots are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Seed for shot sampling; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Print each circuit before running it.
    #[serde(default = "default_true")]
    pub draw_circuits: bool,

    /// Write the SVG plots.
    #[serde(default = "default_true")]
    pub save_plots: bool,

    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Default value functions

fn default_error_angle_deg() -> f64 {
    5.0
}

fn default_shots() -> u32 {
    2048
}

fn default_sweep_message() -> String {
    "11".to_string()
}

fn default_sweep_angles_deg() -> Vec<f64> {
    vec![0.0, 1.0, 2.0, 5.0, 10.0, 15.0]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SuperdenseConfig {
    fn default() -> Self {
        SuperdenseConfig {
            error_angle_deg: default_error_angle_deg(),
            shots: default_shots(),
            sweep_message: default_sweep_message(),
            sweep_angles_deg: default_sweep_angles_deg(),
            output_dir: default_output_dir(),
            seed: None,
            draw_circuits: true,
            save_plots: true,
            log_level: default_log_level(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_angles(value: &str) -> Option<Vec<f64>> {
    value
        .split(',')
        .map(|part| part.trim().parse().ok())
        .collect()
}

fn check_angle(what: &str, degrees: f64) -> ProtocolResult<()> {
    if degrees.is_finite() && degrees >= 0.0 {
        Ok(())
    } else {
        Err(ProtocolError::Config(format!(
            "{what} must be a non-negative number of degrees, got {degrees}"
        )))
    }
}

impl SuperdenseConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ProtocolResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: SuperdenseConfig = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> ProtocolResult<Self> {
        let config = if let Some(path) = config_file {
            Self::from_file(path)?
        } else {
            SuperdenseConfig::default()
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Merge `DENSECODE_*` environment variables into this configuration.
    ///
    /// Only variables that are set override the current values; values that
    /// fail to parse are ignored.
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Merge overrides looked up through `var`.
    pub fn merge_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = var("DENSECODE_ERROR_ANGLE") {
            if let Ok(val) = v.parse() {
                self.error_angle_deg = val;
            }
        }
        if let Some(v) = var("DENSECODE_SHOTS") {
            if let Ok(val) = v.parse() {
                self.shots = val;
            }
        }
        if let Some(v) = var("DENSECODE_SWEEP_MESSAGE") {
            self.sweep_message = v;
        }
        if let Some(v) = var("DENSECODE_SWEEP_ANGLES") {
            if let Some(val) = parse_angles(&v) {
                self.sweep_angles_deg = val;
            }
        }
        if let Some(v) = var("DENSECODE_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = var("DENSECODE_SEED") {
            if let Ok(val) = v.parse() {
                self.seed = Some(val);
            }
        }
        if let Some(v) = var("DENSECODE_DRAW_CIRCUITS") {
            if let Some(val) = parse_bool(&v) {
                self.draw_circuits = val;
            }
        }
        if let Some(v) = var("DENSECODE_SAVE_PLOTS") {
            if let Some(val) = parse_bool(&v) {
                self.save_plots = val;
            }
        }
        if let Some(v) = var("DENSECODE_LOG_LEVEL") {
            self.log_level = v;
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> ProtocolResult<()> {
        if self.shots == 0 {
            return Err(ProtocolError::Config(
                "shots must be greater than 0".to_string(),
            ));
        }

        check_angle("error_angle_deg", self.error_angle_deg)?;

        if self.sweep_angles_deg.is_empty() {
            return Err(ProtocolError::Config(
                "sweep_angles_deg must not be empty".to_string(),
            ));
        }
        for &angle in &self.sweep_angles_deg {
            check_angle("sweep_angles_deg entry", angle)?;
        }

        self.sweep_message
            .parse::<Message>()
            .map_err(|e| ProtocolError::Config(e.to_string()))?;

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ProtocolError::Config(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        Ok(())
    }

    /// The sweep message, parsed.
    pub fn sweep_message(&self) -> ProtocolResult<Message> {
        self.sweep_message.parse()
    }
}
