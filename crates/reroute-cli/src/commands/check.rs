//! Validate the configuration and sheet without writing anything.

use anyhow::Result;
use clap::Args;
use reroute_ingest::Sheet;
use reroute_score::CandidateSet;
use std::path::PathBuf;

use crate::Cli;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Migration sheet (CSV) to validate alongside the configuration
    pub sheet: Option<PathBuf>,

    /// Header of the column holding the old URLs
    #[arg(long, default_value = reroute_ingest::OLD_COLUMN, value_name = "NAME")]
    pub old_column: String,

    /// Header of the column holding the new URLs
    #[arg(long, default_value = reroute_ingest::NEW_COLUMN, value_name = "NAME")]
    pub new_column: String,
}

pub fn run(cli: &Cli, args: &CheckArgs) -> Result<()> {
    let config = cli.load_config()?;
    let rules = config.compile()?;

    println!("Configuration OK");
    println!("  {:<16} {:>6}", "languages", rules.languages.supported().len());
    println!(
        "  {:<16} {:>6}",
        "default",
        rules.languages.default_tag().as_str()
    );
    println!("  {:<16} {:>6}", "min ratio", rules.min_ratio);
    println!("  {:<16} {:>6}", "categories", rules.categories.len());

    if let Some(sheet_path) = &args.sheet {
        let sheet = Sheet::load(sheet_path, &args.old_column, &args.new_column)?;
        let candidates = CandidateSet::build(&sheet.new, &rules.languages)?;

        println!("Sheet OK");
        println!("  {:<16} {:>6}", "old URLs", sheet.old.len());
        println!("  {:<16} {:>6}", "new URLs", sheet.new.len());
        println!("  {:<16} {:>6}", "candidates", candidates.len());
        println!("  {:<16} {}", "fingerprint", &sheet.fingerprint[..12]);

        if !cli.is_quiet() && candidates.len() < sheet.new.len() {
            eprintln!(
                "warning: {} of {} new URLs were skipped as unusable",
                sheet.new.len() - candidates.len(),
                sheet.new.len()
            );
        }
    }

    Ok(())
}
