//! Migration sheet ingestion: CSV columns in, raw URL lists out.

pub(crate) mod fingerprint;
mod sheet;

pub use sheet::{NEW_COLUMN, OLD_COLUMN, Sheet};
