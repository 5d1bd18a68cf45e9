use crate::tokenizer::Tokenizer;
use reroute_core::{CanonicalPath, LanguageTag, Languages, RerouteError};
use tracing::warn;

/// One new-site URL with its derived token sequence and language tag.
///
/// Derivation happens once per batch; every old-path resolution then reads
/// these precomputed values instead of re-tokenizing inside the scoring
/// loop.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub path: CanonicalPath,
    pub tokens: Vec<String>,
    pub language: LanguageTag,
}

impl Candidate {
    fn derive(raw: &str, languages: &Languages) -> Option<Self> {
        let path = CanonicalPath::normalize(raw);
        if !path.is_valid() {
            return None;
        }
        let tokens = Tokenizer::tokenize(&path);
        let language = languages.classify(&path).clone();
        Some(Self {
            path,
            tokens,
            language,
        })
    }
}

/// An old-site URL with the same derived values, computed totally: an
/// unparseable input keeps its raw form but carries the invalid sentinel,
/// an empty token sequence, and the default language tag.
#[derive(Debug, Clone)]
pub struct OldPath {
    pub raw: String,
    pub path: CanonicalPath,
    pub tokens: Vec<String>,
    pub language: LanguageTag,
}

impl OldPath {
    pub fn derive(raw: &str, languages: &Languages) -> Self {
        let path = CanonicalPath::normalize(raw);
        let tokens = Tokenizer::tokenize(&path);
        let language = languages.classify(&path).clone();
        Self {
            raw: raw.to_string(),
            path,
            tokens,
            language,
        }
    }
}

/// The new site's URLs in declaration order, immutable for the duration of
/// a resolution batch. Declaration order is the tie-break of last resort,
/// so it is preserved exactly as ingested; duplicates are kept.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    entries: Vec<Candidate>,
}

impl CandidateSet {
    /// Build the candidate arena, dropping rows that normalize to the
    /// invalid sentinel. An entirely unparseable non-empty input is a
    /// setup error; an empty input is legal and routes every old path to
    /// its language home.
    pub fn build(raw: &[String], languages: &Languages) -> Result<Self, RerouteError> {
        let mut entries = Vec::with_capacity(raw.len());
        let mut skipped = 0usize;

        for value in raw {
            match Candidate::derive(value, languages) {
                Some(candidate) => entries.push(candidate),
                None => {
                    skipped += 1;
                    warn!("skipping unusable new URL: {value:?}");
                }
            }
        }

        if entries.is_empty() && skipped > 0 {
            return Err(RerouteError::Config(format!(
                "none of the {skipped} new URLs could be parsed"
            )));
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[Candidate] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any candidate carries the given language tag.
    pub fn has_language(&self, tag: &LanguageTag) -> bool {
        self.entries.iter().any(|c| &c.language == tag)
    }
}
