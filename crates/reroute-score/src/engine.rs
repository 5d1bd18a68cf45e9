use crate::candidates::{CandidateSet, OldPath};
use crate::fallback::FallbackChain;
use crate::ranker::Ranker;
use crate::similarity::SimilarityScorer;
use crate::tokenizer::Tokenizer;
use rayon::prelude::*;
use reroute_core::{MatchResult, MatchTier, RerouteError, RuleSet};
use tracing::info;

/// Batch redirect resolver.
///
/// Construction ingests the new site's URLs once and precomputes their
/// token sequences and language tags; resolution then runs each old URL
/// independently against that read-only arena. Old paths never see each
/// other's results, which is what makes the batch safe to parallelize.
#[derive(Debug)]
pub struct Engine {
    rules: RuleSet,
    candidates: CandidateSet,
}

impl Engine {
    pub fn new(rules: RuleSet, new_urls: &[String]) -> Result<Self, RerouteError> {
        let candidates = CandidateSet::build(new_urls, &rules.languages)?;
        info!(
            "engine ready: {} candidates, {} languages, {} categories",
            candidates.len(),
            rules.languages.supported().len(),
            rules.categories.len()
        );
        Ok(Self { rules, candidates })
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// Resolve every old URL against the candidate set, in parallel.
    ///
    /// Output order mirrors input order exactly, one result per input,
    /// regardless of how the work was partitioned across threads.
    pub fn resolve_all(&self, old_urls: &[String]) -> Vec<MatchResult> {
        old_urls
            .par_iter()
            .map(|raw| self.resolve_one(raw))
            .collect()
    }

    /// Resolve a single old URL. Total: every input maps to exactly one
    /// result, worst case the language home page.
    pub fn resolve_one(&self, raw: &str) -> MatchResult {
        let old = OldPath::derive(raw, &self.rules.languages);

        if let Some((candidate, score)) = Ranker::best(&old, &self.candidates) {
            return MatchResult {
                old: old.raw,
                resolved: candidate.path.clone(),
                tier: MatchTier::Direct,
                score,
            };
        }

        let chain = FallbackChain::new(&self.rules, &self.candidates);
        let (resolved, tier) = chain.resolve(&old);
        let resolved_tokens = Tokenizer::tokenize(&resolved);
        let score = SimilarityScorer::score(&old.tokens, &old.path, &resolved_tokens, &resolved);
        MatchResult {
            old: old.raw,
            resolved,
            tier,
            score,
        }
    }
}
