use reroute_core::{CanonicalPath, ScoreTuple};
use std::collections::HashSet;

/// Three-signal similarity between one old path and one candidate.
///
/// The signals are independent and cheap: positional hierarchy matches,
/// unordered token overlap, and a normalized string-similarity ratio over
/// the canonical strings. Comparison happens lexicographically in
/// [`ScoreTuple`], most-significant first.
pub struct SimilarityScorer;

impl SimilarityScorer {
    pub fn score(
        old_tokens: &[String],
        old_path: &CanonicalPath,
        new_tokens: &[String],
        new_path: &CanonicalPath,
    ) -> ScoreTuple {
        if !old_path.is_valid() || !new_path.is_valid() {
            return ScoreTuple::ZERO;
        }

        // Zip to the shorter sequence: only aligned positions count.
        let hierarchy = old_tokens
            .iter()
            .zip(new_tokens)
            .filter(|(a, b)| a == b)
            .count();

        let old_set: HashSet<&str> = old_tokens.iter().map(String::as_str).collect();
        let new_set: HashSet<&str> = new_tokens.iter().map(String::as_str).collect();
        let shared = old_set.intersection(&new_set).count();

        ScoreTuple {
            hierarchy,
            shared,
            ratio: Self::ratio(old_path, new_path),
        }
    }

    /// Normalized Levenshtein similarity of the canonical strings, in
    /// `[0, 1]`. The invalid sentinel has nothing to compare; it scores 0.
    pub fn ratio(old_path: &CanonicalPath, new_path: &CanonicalPath) -> f64 {
        if !old_path.is_valid() || !new_path.is_valid() {
            return 0.0;
        }
        strsim::normalized_levenshtein(old_path.as_str(), new_path.as_str())
    }
}
