use reroute_core::{MatchResult, MatchTier, RuleSet};
use serde::Serialize;
use std::io::Write;

/// Report format version, bumped on wire-shape changes.
const REPORT_VERSION: &str = "0.1";

/// Writes a machine-readable resolution report in JSONL: one header line
/// with the run's configuration and input fingerprint, one line per
/// result, one footer line with per-tier totals.
pub struct JsonlWriter {
    fingerprint: String,
    languages: Vec<String>,
    default_language: String,
    min_ratio: f64,
    candidate_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Header {
    version: String,
    fingerprint: String,
    languages: Vec<String>,
    default_language: String,
    min_ratio: f64,
    candidates: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Entry {
    old: String,
    resolved: String,
    tier: String,
    hierarchy: usize,
    shared_tokens: usize,
    similarity: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Footer {
    total: usize,
    direct: usize,
    same_language: usize,
    category_override: usize,
    cross_language: usize,
    language_home: usize,
}

impl JsonlWriter {
    pub fn new(fingerprint: &str, rules: &RuleSet) -> Self {
        Self {
            fingerprint: fingerprint.to_string(),
            languages: rules
                .languages
                .supported()
                .iter()
                .map(|t| t.as_str().to_string())
                .collect(),
            default_language: rules.languages.default_tag().as_str().to_string(),
            min_ratio: rules.min_ratio,
            candidate_count: 0,
        }
    }

    pub fn candidate_count(mut self, count: usize) -> Self {
        self.candidate_count = count;
        self
    }

    /// Render the report as a JSONL string.
    pub fn render(&self, results: &[MatchResult]) -> anyhow::Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf, results)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Write the report to a writer.
    pub fn write_to(&self, writer: &mut dyn Write, results: &[MatchResult]) -> anyhow::Result<()> {
        let header = Header {
            version: REPORT_VERSION.to_string(),
            fingerprint: self.fingerprint.clone(),
            languages: self.languages.clone(),
            default_language: self.default_language.clone(),
            min_ratio: self.min_ratio,
            candidates: self.candidate_count,
        };
        serde_json::to_writer(&mut *writer, &header)?;
        writeln!(writer)?;

        let mut footer = Footer {
            total: results.len(),
            direct: 0,
            same_language: 0,
            category_override: 0,
            cross_language: 0,
            language_home: 0,
        };
        for result in results {
            let entry = Entry {
                old: result.old.clone(),
                resolved: result.resolved.as_str().to_string(),
                tier: result.tier.as_str().to_string(),
                hierarchy: result.score.hierarchy,
                shared_tokens: result.score.shared,
                similarity: result.score.ratio,
            };
            serde_json::to_writer(&mut *writer, &entry)?;
            writeln!(writer)?;

            match result.tier {
                MatchTier::Direct => footer.direct += 1,
                MatchTier::SameLanguage => footer.same_language += 1,
                MatchTier::CategoryOverride => footer.category_override += 1,
                MatchTier::CrossLanguage => footer.cross_language += 1,
                MatchTier::LanguageHome => footer.language_home += 1,
            }
        }

        serde_json::to_writer(&mut *writer, &footer)?;
        writeln!(writer)?;
        Ok(())
    }
}
