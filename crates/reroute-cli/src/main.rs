//! Command line entry point for the redirect resolver.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "reroute",
    version,
    about = "Resolve old site URLs to their best new targets"
)]
struct Cli {
    /// Configuration file (falls back to ./reroute.toml when present)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a migration sheet into a redirect mapping
    Resolve(commands::resolve::ResolveArgs),
    /// Validate the configuration and sheet without writing anything
    Check(commands::check::CheckArgs),
    /// Write a starter configuration file
    Init(commands::init::InitArgs),
}

impl Cli {
    fn is_quiet(&self) -> bool {
        self.quiet
    }

    fn load_config(&self) -> Result<reroute_core::EngineConfig> {
        config::load(self.config.as_deref())
    }
}

/// `RUST_LOG` wins over the verbosity flags when set.
fn init_logging(cli: &Cli) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = if cli.quiet {
            "error"
        } else {
            match cli.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        };
        EnvFilter::new(level)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match &cli.command {
        Commands::Resolve(args) => commands::resolve::run(&cli, args),
        Commands::Check(args) => commands::check::run(&cli, args),
        Commands::Init(args) => commands::init::run(&cli, args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_resolve_with_defaults() {
        let cli = Cli::try_parse_from(["reroute", "resolve", "sheet.csv"]).unwrap();
        match &cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.sheet, PathBuf::from("sheet.csv"));
                assert_eq!(args.output, PathBuf::from("redirects.csv"));
                assert_eq!(args.old_column, reroute_ingest::OLD_COLUMN);
                assert!(args.report.is_none());
            }
            other => panic!("expected resolve, got {other:?}"),
        }
        assert!(!cli.is_quiet());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn global_flags_parse_after_the_subcommand() {
        let cli =
            Cli::try_parse_from(["reroute", "resolve", "sheet.csv", "-vv", "--quiet"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.is_quiet());
    }

    #[test]
    fn config_override_is_captured() {
        let cli = Cli::try_parse_from(["reroute", "--config", "custom.toml", "check"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn a_subcommand_is_required() {
        assert!(Cli::try_parse_from(["reroute"]).is_err());
    }

    #[test]
    fn resolve_accepts_column_and_ratio_overrides() {
        let cli = Cli::try_parse_from([
            "reroute",
            "resolve",
            "sheet.csv",
            "--old-column",
            "Source",
            "--new-column",
            "Target",
            "--min-ratio",
            "0.4",
        ])
        .unwrap();
        match &cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.old_column, "Source");
                assert_eq!(args.new_column, "Target");
                assert_eq!(args.min_ratio, Some(0.4));
            }
            other => panic!("expected resolve, got {other:?}"),
        }
    }
}
