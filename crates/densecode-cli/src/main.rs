//! densecode command-line interface.
//!
//! With no subcommand, runs the full demonstration: every message at the
//! configured gate-error angle, a summary table, a gate-error sweep and the
//! two SVG plots.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use densecode_protocol::SuperdenseConfig;

mod commands;

use commands::common::{RunOptions, SweepOptions};
use commands::{demo, run, sweep, version};

/// densecode - superdense coding under imperfect gates
#[derive(Parser)]
#[command(name = "densecode")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file
    #[arg(short, long, global = true, env = "DENSECODE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full demonstration (default)
    Demo,

    /// Run the protocol for one message, or for all four
    Run(RunOptions),

    /// Measure fidelity across a range of gate-error angles
    Sweep(SweepOptions),

    /// Show version information
    Version,
}

fn log_filter(verbose: u8, config: Option<&SuperdenseConfig>) -> String {
    match verbose {
        0 => config.map_or_else(|| "warn".to_string(), |c| c.log_level.clone()),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

async fn dispatch(command: Option<Commands>, config: SuperdenseConfig) -> anyhow::Result<()> {
    match command.unwrap_or(Commands::Demo) {
        Commands::Demo => demo::execute(&config).await,
        Commands::Run(options) => run::execute(&options.apply(config)?).await,
        Commands::Sweep(options) => sweep::execute(&options.apply(config)?).await,
        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = SuperdenseConfig::load(cli.config.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_filter(cli.verbose, config.as_ref().ok())))
        .with_target(false)
        .init();

    let result = match config {
        Ok(config) => dispatch(cli.command, config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_demo() {
        let cli = Cli::try_parse_from(["densecode"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::try_parse_from(["densecode", "-vv", "version"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Commands::Version)));
        assert_eq!(log_filter(cli.verbose, None), "debug");
    }

    #[test]
    fn test_quiet_filter_uses_config_level() {
        let config = SuperdenseConfig {
            log_level: "error".to_string(),
            ..Default::default()
        };
        assert_eq!(log_filter(0, Some(&config)), "error");
        assert_eq!(log_filter(0, None), "warn");
        assert_eq!(log_filter(5, Some(&config)), "trace");
    }

    #[test]
    fn test_run_flags() {
        let cli = Cli::try_parse_from([
            "densecode", "run", "--message", "10", "--angle", "2.5", "--shots", "100", "--seed",
            "7", "--no-draw",
        ])
        .unwrap();
        let Some(Commands::Run(options)) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(options.message.as_deref(), Some("10"));
        assert_eq!(options.angle, Some(2.5));
        assert_eq!(options.common.shots, Some(100));
        assert_eq!(options.common.seed, Some(7));
        assert!(options.no_draw);
    }

    #[test]
    fn test_sweep_angle_list() {
        let cli = Cli::try_parse_from(["densecode", "sweep", "--angles", "0,1,5", "--message", "01"])
            .unwrap();
        let Some(Commands::Sweep(options)) = cli.command else {
            panic!("expected sweep");
        };
        assert_eq!(options.angles, Some(vec![0.0, 1.0, 5.0]));
        assert_eq!(options.message.as_deref(), Some("01"));
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["densecode", "sweep", "--config", "cfg.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("cfg.yaml")));
    }
}
