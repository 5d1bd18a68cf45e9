//! Resolve a migration sheet into a redirect mapping.

use anyhow::{Context, Result};
use clap::Args;
use reroute_core::{MatchResult, MatchTier};
use reroute_ingest::Sheet;
use reroute_render::{JsonlWriter, MappingWriter};
use reroute_score::Engine;
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;

use crate::Cli;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Migration sheet (CSV) with the old and new URL columns
    pub sheet: PathBuf,

    /// Where to write the redirect mapping
    #[arg(short, long, default_value = "redirects.csv", value_name = "PATH")]
    pub output: PathBuf,

    /// Also write a JSONL resolution report
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Header of the column holding the old URLs
    #[arg(long, default_value = reroute_ingest::OLD_COLUMN, value_name = "NAME")]
    pub old_column: String,

    /// Header of the column holding the new URLs
    #[arg(long, default_value = reroute_ingest::NEW_COLUMN, value_name = "NAME")]
    pub new_column: String,

    /// Override the configured cross-language similarity floor
    #[arg(long, value_name = "RATIO")]
    pub min_ratio: Option<f64>,

    /// Mapping rows echoed after resolution (0 disables the preview)
    #[arg(long, default_value_t = 10, value_name = "N")]
    pub preview: usize,
}

pub fn run(cli: &Cli, args: &ResolveArgs) -> Result<()> {
    let mut config = cli.load_config()?;
    if let Some(ratio) = args.min_ratio {
        config.matching.min_ratio = ratio;
    }
    let rules = config.compile()?;

    let start = Instant::now();
    let sheet = Sheet::load(&args.sheet, &args.old_column, &args.new_column)?;
    debug!("ingest took {:?}", start.elapsed());
    if !cli.is_quiet() {
        eprintln!(
            "Resolving {} old URLs against {} new URLs (fingerprint: {})",
            sheet.old.len(),
            sheet.new.len(),
            &sheet.fingerprint[..12]
        );
    }

    let start = Instant::now();
    let engine = Engine::new(rules, &sheet.new)?;
    let results = engine.resolve_all(&sheet.old);
    debug!("resolution took {:?}", start.elapsed());

    let start = Instant::now();
    MappingWriter::write_path(&args.output, &results)?;

    if let Some(report) = &args.report {
        let mut file =
            File::create(report).with_context(|| format!("creating report {}", report.display()))?;
        JsonlWriter::new(&sheet.fingerprint, engine.rules())
            .candidate_count(engine.candidates().len())
            .write_to(&mut file, &results)?;
    }
    debug!("render took {:?}", start.elapsed());

    if !cli.is_quiet() {
        print_summary(&results, args.preview);
        eprintln!("Mapping written to {}", args.output.display());
        if let Some(report) = &args.report {
            eprintln!("Report written to {}", report.display());
        }
        eprintln!("Done.");
    }

    Ok(())
}

fn print_summary(results: &[MatchResult], preview: usize) {
    println!("Resolved {} URLs", results.len());
    for tier in MatchTier::all() {
        let count = results.iter().filter(|r| r.tier == tier).count();
        println!("  {:<16} {:>6}", tier.as_str(), count);
    }

    if preview > 0 && !results.is_empty() {
        println!();
        for result in results.iter().take(preview) {
            println!(
                "  {} -> {} [{}]",
                result.old,
                result.resolved,
                result.tier.as_str()
            );
        }
        if results.len() > preview {
            println!("  ... and {} more", results.len() - preview);
        }
    }
}
