/// Errors that can occur in Reroute operations.
///
/// These are batch-level failures only: a single path that cannot be
/// normalized degrades to a sentinel value and keeps flowing through the
/// pipeline instead of raising.
#[derive(Debug, thiserror::Error)]
pub enum RerouteError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("ingest error: {0}")]
    Ingest(String),
}

impl From<std::io::Error> for RerouteError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
