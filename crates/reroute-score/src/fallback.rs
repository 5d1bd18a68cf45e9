use crate::candidates::{Candidate, CandidateSet, OldPath};
use crate::similarity::SimilarityScorer;
use reroute_core::{CanonicalPath, MatchTier, RuleSet};

/// Layered fallback for old paths the ranker could not place directly.
///
/// States are tried strictly in order, each either producing a resolved
/// path or falling through to the next. The final state always succeeds,
/// so every old path leaves the chain with a target; "no redirect" is not
/// an outcome.
pub struct FallbackChain<'a> {
    rules: &'a RuleSet,
    candidates: &'a CandidateSet,
}

impl<'a> FallbackChain<'a> {
    pub fn new(rules: &'a RuleSet, candidates: &'a CandidateSet) -> Self {
        Self { rules, candidates }
    }

    /// Resolve one old path through the chain. Total: always returns a
    /// path and the tier that produced it.
    pub fn resolve(&self, old: &OldPath) -> (CanonicalPath, MatchTier) {
        if self.candidates.is_empty() {
            // Nothing to rank or fall back on; go straight to the home page.
            return (self.language_home(old), MatchTier::LanguageHome);
        }
        if let Some(path) = self.same_language(old) {
            return (path, MatchTier::SameLanguage);
        }
        if let Some(path) = self.category_override(old) {
            return (path, MatchTier::CategoryOverride);
        }
        if let Some(path) = self.cross_language(old) {
            return (path, MatchTier::CrossLanguage);
        }
        (self.language_home(old), MatchTier::LanguageHome)
    }

    /// Candidates in the old path's language that share at least one
    /// token, best similarity ratio first.
    fn same_language(&self, old: &OldPath) -> Option<CanonicalPath> {
        let eligible = |c: &Candidate| {
            c.language == old.language && c.tokens.iter().any(|t| old.tokens.contains(t))
        };
        self.best_ratio(old, eligible)
            .map(|(c, _)| c.path.clone())
    }

    /// Configured landing page for the first category whose keywords hit
    /// the old path. The landing is looked up for the old path's language
    /// when the candidate set carries that language, otherwise for the
    /// default language; whichever entry is missing, the other still
    /// applies, and a matching category with neither entry is skipped.
    fn category_override(&self, old: &OldPath) -> Option<CanonicalPath> {
        let default = self.rules.languages.default_tag();
        let (first, second) = if self.candidates.has_language(&old.language) {
            (&old.language, default)
        } else {
            (default, &old.language)
        };
        self.rules
            .categories
            .iter()
            .filter(|cat| cat.matches(&old.path))
            .find_map(|cat| cat.landing_for(first).or_else(|| cat.landing_for(second)))
            .cloned()
    }

    /// Best similarity ratio across every non-root candidate, any
    /// language, accepted only above the configured threshold. A zero
    /// ratio means the paths have nothing in common and is never taken.
    fn cross_language(&self, old: &OldPath) -> Option<CanonicalPath> {
        self.best_ratio(old, |c: &Candidate| !c.path.is_root())
            .filter(|(_, ratio)| *ratio >= self.rules.min_ratio && *ratio > 0.0)
            .map(|(c, _)| c.path.clone())
    }

    /// Terminal state: the home page of the old path's language, or the
    /// default language's home when no candidate carries that tag.
    fn language_home(&self, old: &OldPath) -> CanonicalPath {
        if self.candidates.has_language(&old.language) {
            old.language.home_path()
        } else {
            self.rules.languages.default_tag().home_path()
        }
    }

    /// Strict-maximum scan by ratio over eligible candidates; first-seen
    /// wins on ties, matching the ranker's determinism rule.
    fn best_ratio<F>(&self, old: &OldPath, eligible: F) -> Option<(&'a Candidate, f64)>
    where
        F: Fn(&Candidate) -> bool,
    {
        let mut best: Option<(&Candidate, f64)> = None;
        for candidate in self.candidates.entries() {
            if !eligible(candidate) {
                continue;
            }
            let ratio = SimilarityScorer::ratio(&old.path, &candidate.path);
            let better = match &best {
                Some((_, current)) => ratio > *current,
                None => true,
            };
            if better {
                best = Some((candidate, ratio));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reroute_core::{CategoryConfig, EngineConfig, LanguagesConfig};
    use std::collections::BTreeMap;

    fn rules() -> RuleSet {
        EngineConfig::default().compile().unwrap()
    }

    fn rules_with_rooms_category() -> RuleSet {
        let mut config = EngineConfig {
            languages: LanguagesConfig {
                supported: vec!["/en/".into(), "/de/".into(), "/fr/".into()],
                default: "/".into(),
            },
            ..EngineConfig::default()
        };
        config.categories.push(CategoryConfig {
            name: "rooms".to_string(),
            keywords: vec!["habitacion".to_string(), "room".to_string()],
            landing: BTreeMap::from([
                ("/".to_string(), "/habitaciones/".to_string()),
                ("/en/".to_string(), "/en/rooms/".to_string()),
            ]),
        });
        config.compile().unwrap()
    }

    fn set(rules: &RuleSet, values: &[&str]) -> CandidateSet {
        let raw: Vec<String> = values.iter().map(|s| s.to_string()).collect();
        CandidateSet::build(&raw, &rules.languages).unwrap()
    }

    fn old(rules: &RuleSet, raw: &str) -> OldPath {
        OldPath::derive(raw, &rules.languages)
    }

    #[test]
    fn same_language_needs_a_shared_token() {
        let rules = rules();
        // Default-language paths carry no language token, so vocabulary
        // alone decides eligibility here.
        let candidates = set(&rules, &["/contacto/", "/desayuno/"]);
        let chain = FallbackChain::new(&rules, &candidates);
        let (_, tier) = chain.resolve(&old(&rules, "/bodas/"));
        assert_eq!(tier, MatchTier::CrossLanguage);
    }

    #[test]
    fn language_prefix_counts_as_shared_vocabulary() {
        let rules = rules();
        let candidates = set(&rules, &["/en/contact/", "/en/breakfast/"]);
        let chain = FallbackChain::new(&rules, &candidates);
        // The "en" segment is a token like any other, so a same-language
        // candidate always clears the overlap filter.
        let (_, tier) = chain.resolve(&old(&rules, "/en/weddings/"));
        assert_eq!(tier, MatchTier::SameLanguage);
    }

    #[test]
    fn same_language_picks_best_ratio() {
        let rules = rules();
        let candidates = set(
            &rules,
            &["/en/room-offers-archive/", "/en/room-offers/", "/de/room-offers/"],
        );
        let chain = FallbackChain::new(&rules, &candidates);
        let (path, tier) = chain.resolve(&old(&rules, "/en/all-room-offers/"));
        assert_eq!(tier, MatchTier::SameLanguage);
        assert_eq!(path.as_str(), "/en/room-offers/");
    }

    #[test]
    fn category_override_fires_after_same_language_fails() {
        let rules = rules_with_rooms_category();
        let candidates = set(&rules, &["/en/kontakt/", "/en/rooms/"]);
        let chain = FallbackChain::new(&rules, &candidates);
        // No /de/ candidates share a token, but the keyword "room" hits.
        let (path, tier) = chain.resolve(&old(&rules, "/de/room-untranslated/"));
        assert_eq!(tier, MatchTier::CategoryOverride);
        // /de/ is absent from the candidate set; the default language's
        // landing wins.
        assert_eq!(path.as_str(), "/habitaciones/");
    }

    #[test]
    fn category_override_applies_to_untranslated_pages() {
        let rules = rules_with_rooms_category();
        // An untranslated candidate keeps the old path's (default) language
        // in the set, so its landing entry applies.
        let candidates = set(&rules, &["/contacto/"]);
        let chain = FallbackChain::new(&rules, &candidates);
        let (path, tier) = chain.resolve(&old(&rules, "/habitacion-doble/"));
        assert_eq!(tier, MatchTier::CategoryOverride);
        assert_eq!(path.as_str(), "/habitaciones/");
    }

    #[test]
    fn category_override_uses_default_landing_when_old_language_has_no_candidates() {
        let mut config = EngineConfig {
            languages: LanguagesConfig {
                supported: vec!["/en/".into(), "/de/".into()],
                default: "/".into(),
            },
            ..EngineConfig::default()
        };
        config.categories.push(CategoryConfig {
            name: "rooms".to_string(),
            keywords: vec!["room".to_string()],
            landing: BTreeMap::from([
                ("/".to_string(), "/habitaciones/".to_string()),
                ("/de/".to_string(), "/de/zimmer/".to_string()),
            ]),
        });
        let rules = config.compile().unwrap();
        let candidates = set(&rules, &["/en/kontakt/"]);
        let chain = FallbackChain::new(&rules, &candidates);
        // A /de/ landing is configured, but the new set has no /de/ pages
        // at all; the /de/ entry is ignored in favor of the default one.
        let (path, tier) = chain.resolve(&old(&rules, "/de/room-detail/"));
        assert_eq!(tier, MatchTier::CategoryOverride);
        assert_eq!(path.as_str(), "/habitaciones/");
    }

    #[test]
    fn category_override_falls_back_to_the_only_landing_entry() {
        let mut config = EngineConfig {
            languages: LanguagesConfig {
                supported: vec!["/en/".into()],
                default: "/".into(),
            },
            ..EngineConfig::default()
        };
        config.categories.push(CategoryConfig {
            name: "rooms".to_string(),
            keywords: vec!["room".to_string()],
            landing: BTreeMap::from([("/en/".to_string(), "/en/rooms/".to_string())]),
        });
        let rules = config.compile().unwrap();
        let candidates = set(&rules, &["/contacto/"]);
        let chain = FallbackChain::new(&rules, &candidates);
        // No /en/ candidates and no default entry either; the single /en/
        // entry still beats skipping the category.
        let (path, tier) = chain.resolve(&old(&rules, "/en/honeymoon-room-photos/"));
        assert_eq!(tier, MatchTier::CategoryOverride);
        assert_eq!(path.as_str(), "/en/rooms/");
    }

    #[test]
    fn cross_language_skips_the_site_root() {
        let rules = rules();
        let candidates = set(&rules, &["/", "/fr/grande-suite/"]);
        let chain = FallbackChain::new(&rules, &candidates);
        let (path, tier) = chain.resolve(&old(&rules, "/de/grand-suite/"));
        assert_eq!(tier, MatchTier::CrossLanguage);
        assert_eq!(path.as_str(), "/fr/grande-suite/");
    }

    #[test]
    fn cross_language_respects_the_minimum_ratio() {
        let mut config = EngineConfig::default();
        config.matching.min_ratio = 0.95;
        let rules = config.compile().unwrap();
        let candidates = set(&rules, &["/fr/completement-different/"]);
        let chain = FallbackChain::new(&rules, &candidates);
        let (path, tier) = chain.resolve(&old(&rules, "/de/anders/"));
        assert_eq!(tier, MatchTier::LanguageHome);
        // No /de/ candidates exist, so the home falls back to the default.
        assert_eq!(path.as_str(), "/");
    }

    #[test]
    fn invalid_old_path_reaches_language_home_even_with_zero_threshold() {
        let mut config = EngineConfig::default();
        config.matching.min_ratio = 0.0;
        let rules = config.compile().unwrap();
        let candidates = set(&rules, &["/en/rooms/", "/contact/"]);
        let chain = FallbackChain::new(&rules, &candidates);
        let (_, tier) = chain.resolve(&old(&rules, "   "));
        assert_eq!(tier, MatchTier::LanguageHome);
    }

    #[test]
    fn only_root_candidate_goes_to_language_home() {
        let rules = rules();
        let candidates = set(&rules, &["/"]);
        let chain = FallbackChain::new(&rules, &candidates);
        // The root shares no tokens and cross-language excludes it, so the
        // chain runs all the way down.
        let (path, tier) = chain.resolve(&old(&rules, "/estranged-page/"));
        assert_eq!(tier, MatchTier::LanguageHome);
        assert_eq!(path.as_str(), "/");
    }

    #[test]
    fn empty_candidates_short_circuit_to_language_home() {
        let mut config = EngineConfig::default();
        config.languages = LanguagesConfig {
            supported: vec!["/en/".into()],
            default: "/en/".into(),
        };
        config.categories.push(CategoryConfig {
            name: "rooms".to_string(),
            keywords: vec!["room".to_string()],
            landing: BTreeMap::from([("/en/".to_string(), "/en/rooms/".to_string())]),
        });
        let rules = config.compile().unwrap();
        let candidates = CandidateSet::build(&[], &rules.languages).unwrap();
        let chain = FallbackChain::new(&rules, &candidates);
        // Even a category keyword hit must not fire when there is nothing
        // to redirect into; the chain goes straight home.
        let (path, tier) = chain.resolve(&old(&rules, "/en/room-detail/"));
        assert_eq!(tier, MatchTier::LanguageHome);
        assert_eq!(path.as_str(), "/en/");
    }
}
