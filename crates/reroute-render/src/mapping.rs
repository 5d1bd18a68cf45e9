use reroute_core::MatchResult;
use std::io::Write;
use std::path::Path;

/// Writes the final redirect mapping as CSV, one row per old URL, in
/// batch order. This is the deliverable an operator loads back into a
/// spreadsheet or feeds to a redirect generator.
pub struct MappingWriter;

impl MappingWriter {
    /// Write the mapping to a file, creating parent directories.
    pub fn write_path(path: &Path, results: &[MatchResult]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let writer = csv::WriterBuilder::new()
            .has_headers(true)
            .quote_style(csv::QuoteStyle::Necessary)
            .from_path(path)?;
        Self::write_records(writer, results)
    }

    /// Render the mapping as a CSV string.
    pub fn render(results: &[MatchResult]) -> anyhow::Result<String> {
        let mut buf = Vec::new();
        Self::write_to(&mut buf, results)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Write the mapping to any writer.
    pub fn write_to(writer: &mut dyn Write, results: &[MatchResult]) -> anyhow::Result<()> {
        let csv_writer = csv::WriterBuilder::new()
            .has_headers(true)
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(writer);
        Self::write_records(csv_writer, results)
    }

    fn write_records<W: Write>(
        mut writer: csv::Writer<W>,
        results: &[MatchResult],
    ) -> anyhow::Result<()> {
        writer.write_record([
            "Old URL",
            "Resolved URL",
            "Tier",
            "Hierarchy",
            "Shared Tokens",
            "Similarity",
        ])?;
        for result in results {
            writer.write_record([
                result.old.as_str(),
                result.resolved.as_str(),
                result.tier.as_str(),
                &result.score.hierarchy.to_string(),
                &result.score.shared.to_string(),
                // Fixed precision keeps re-runs byte-identical.
                &format!("{:.4}", result.score.ratio),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}
