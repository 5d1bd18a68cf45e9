//! Write a starter configuration file.

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

use crate::Cli;

const CONFIG_TEMPLATE: &str = include_str!("../../templates/reroute.toml");

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the configuration (defaults to ./reroute.toml)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, PartialEq)]
enum WriteResult {
    Created,
    Skipped,
}

pub fn run(cli: &Cli, args: &InitArgs) -> Result<()> {
    let path = args
        .path
        .clone()
        .unwrap_or_else(|| PathBuf::from(crate::config::DEFAULT_CONFIG_PATH));

    match write_template(&path, CONFIG_TEMPLATE, args.force)? {
        WriteResult::Created => {
            if !cli.is_quiet() {
                println!("Wrote {}", path.display());
            }
        }
        WriteResult::Skipped => {
            if !cli.is_quiet() {
                println!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
        }
    }

    Ok(())
}

fn write_template(path: &Path, content: &str, force: bool) -> Result<WriteResult> {
    if path.exists() && !force {
        return Ok(WriteResult::Skipped);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
    }

    fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    Ok(WriteResult::Created)
}
