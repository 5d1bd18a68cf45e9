use crate::fingerprint;
use reroute_core::RerouteError;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Default header of the old-URL column.
pub const OLD_COLUMN: &str = "Old URLs";
/// Default header of the new-URL column.
pub const NEW_COLUMN: &str = "New URLs";

/// A migration sheet: the raw old and new URL columns in file order, plus
/// a fingerprint identifying exactly this input.
///
/// Cells come through untouched; normalization and validation belong to
/// the engine, which knows how to degrade bad rows instead of failing the
/// batch. Blank cells are skipped, so the two columns may have different
/// lengths.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub old: Vec<String>,
    pub new: Vec<String>,
    pub fingerprint: String,
}

impl Sheet {
    /// Read a CSV file with an old-URL and a new-URL column.
    pub fn load(path: &Path, old_column: &str, new_column: &str) -> Result<Self, RerouteError> {
        let file = File::open(path)
            .map_err(|e| RerouteError::Io(format!("{}: {e}", path.display())))?;
        Self::read(file, old_column, new_column)
    }

    /// Read sheet CSV from any reader. Header lookup is case-insensitive;
    /// rows may be ragged since the two columns are independent lists that
    /// merely share a file.
    pub fn read<R: Read>(
        reader: R,
        old_column: &str,
        new_column: &str,
    ) -> Result<Self, RerouteError> {
        let mut csv = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers = csv
            .headers()
            .map_err(|e| RerouteError::Ingest(e.to_string()))?
            .clone();
        let old_idx = find_column(&headers, old_column)?;
        let new_idx = find_column(&headers, new_column)?;

        let mut old = Vec::new();
        let mut new = Vec::new();
        for record in csv.records() {
            let record = record.map_err(|e| RerouteError::Ingest(e.to_string()))?;
            if let Some(cell) = cell_value(&record, old_idx) {
                old.push(cell);
            }
            if let Some(cell) = cell_value(&record, new_idx) {
                new.push(cell);
            }
        }

        if old.is_empty() {
            return Err(RerouteError::Ingest(format!(
                "column {old_column:?} has no URLs; wrong sheet or wrong column name?"
            )));
        }

        debug!("sheet loaded: {} old URLs, {} new URLs", old.len(), new.len());
        let fingerprint = fingerprint::generate(&old, &new);
        Ok(Self {
            old,
            new,
            fingerprint,
        })
    }
}

fn cell_value(record: &csv::StringRecord, idx: usize) -> Option<String> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize, RerouteError> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| {
            let seen: Vec<&str> = headers.iter().collect();
            RerouteError::Ingest(format!("missing column {name:?}, sheet has {seen:?}"))
        })
}
