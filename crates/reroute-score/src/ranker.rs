use crate::candidates::{Candidate, CandidateSet, OldPath};
use crate::similarity::SimilarityScorer;
use reroute_core::ScoreTuple;

/// Orders candidates for one old path and selects the direct match.
///
/// Acceptance is structural: a candidate wins directly only when at least
/// one hierarchy position or one shared token lines up. A pure
/// string-similarity match with zero token overlap is no evidence the
/// pages are related, so it is routed to the fallback chain instead.
pub struct Ranker;

impl Ranker {
    /// Score every candidate and return them ordered best-first.
    ///
    /// The sort is stable and ties compare equal, so candidates with
    /// identical tuples keep their declaration order.
    pub fn rank<'a>(
        old: &OldPath,
        candidates: &'a CandidateSet,
    ) -> Vec<(&'a Candidate, ScoreTuple)> {
        let mut ranked: Vec<(&Candidate, ScoreTuple)> = candidates
            .entries()
            .iter()
            .map(|c| {
                (
                    c,
                    SimilarityScorer::score(&old.tokens, &old.path, &c.tokens, &c.path),
                )
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// The best-scoring candidate, if it clears the structural bar.
    ///
    /// Strictly-greater replacement keeps the first-seen candidate on
    /// ties, mirroring the declaration-order tie-break of [`Self::rank`]
    /// without allocating.
    pub fn best<'a>(
        old: &OldPath,
        candidates: &'a CandidateSet,
    ) -> Option<(&'a Candidate, ScoreTuple)> {
        let mut best: Option<(&Candidate, ScoreTuple)> = None;
        for candidate in candidates.entries() {
            let score =
                SimilarityScorer::score(&old.tokens, &old.path, &candidate.tokens, &candidate.path);
            let better = match &best {
                Some((_, current)) => score > *current,
                None => true,
            };
            if better {
                best = Some((candidate, score));
            }
        }
        best.filter(|(_, score)| score.has_structural_overlap())
    }
}
