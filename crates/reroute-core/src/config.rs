use crate::error::RerouteError;
use crate::types::{CanonicalPath, LanguageTag};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default acceptance threshold for the cross-language fallback.
const DEFAULT_MIN_RATIO: f64 = 0.25;

/// File-facing engine configuration, deserialized from `reroute.toml`.
///
/// Raw strings only; nothing is trusted until [`EngineConfig::compile`]
/// turns it into a validated [`RuleSet`] at batch start. Declaration order
/// of `supported` and of `categories`/`keywords` is significant and
/// preserved.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub languages: LanguagesConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguagesConfig {
    /// Ordered language prefixes; earlier entries win when several match.
    #[serde(default = "default_supported")]
    pub supported: Vec<String>,
    /// Tag assigned when no supported prefix occurs in a path.
    #[serde(default = "default_language")]
    pub default: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Minimum similarity ratio the cross-language fallback will accept.
    #[serde(default = "default_min_ratio")]
    pub min_ratio: f64,
}

/// One category override: old paths containing any keyword are redirected
/// to the landing page configured for their language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    /// Ordered keywords, matched as substrings of the canonical path.
    pub keywords: Vec<String>,
    /// Language tag to landing page.
    #[serde(default)]
    pub landing: BTreeMap<String, String>,
}

fn default_supported() -> Vec<String> {
    vec!["/en/".to_string(), "/de/".to_string(), "/fr/".to_string()]
}

fn default_language() -> String {
    "/".to_string()
}

fn default_min_ratio() -> f64 {
    DEFAULT_MIN_RATIO
}

impl Default for LanguagesConfig {
    fn default() -> Self {
        Self {
            supported: default_supported(),
            default: default_language(),
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            min_ratio: default_min_ratio(),
        }
    }
}

impl EngineConfig {
    /// Validate and convert into the typed form the engine consumes.
    ///
    /// All violations are batch-level `Config` errors; nothing here is a
    /// per-record concern.
    pub fn compile(&self) -> Result<RuleSet, RerouteError> {
        let languages = self.compile_languages()?;

        let min_ratio = self.matching.min_ratio;
        if !min_ratio.is_finite() || !(0.0..=1.0).contains(&min_ratio) {
            return Err(RerouteError::Config(format!(
                "matching.min_ratio must be within 0..=1, got {min_ratio}"
            )));
        }

        let categories = self
            .categories
            .iter()
            .map(|c| compile_category(c, &languages))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RuleSet {
            languages,
            min_ratio,
            categories,
        })
    }

    fn compile_languages(&self) -> Result<Languages, RerouteError> {
        if self.languages.supported.is_empty() {
            return Err(RerouteError::Config(
                "languages.supported is empty: at least one language tag is required".to_string(),
            ));
        }

        let mut supported = Vec::with_capacity(self.languages.supported.len());
        for raw in &self.languages.supported {
            let tag = LanguageTag::new(raw).ok_or_else(|| {
                RerouteError::Config(format!("invalid language tag {raw:?} in languages.supported"))
            })?;
            if tag.is_root() {
                return Err(RerouteError::Config(
                    "the root tag \"/\" cannot be a supported language (it matches every path); \
                     use it as languages.default instead"
                        .to_string(),
                ));
            }
            if supported.contains(&tag) {
                return Err(RerouteError::Config(format!(
                    "duplicate language tag {} in languages.supported",
                    tag.as_str()
                )));
            }
            supported.push(tag);
        }

        let default = LanguageTag::new(&self.languages.default).ok_or_else(|| {
            RerouteError::Config(format!(
                "invalid default language tag {:?}",
                self.languages.default
            ))
        })?;

        Ok(Languages { supported, default })
    }
}

fn compile_category(raw: &CategoryConfig, languages: &Languages) -> Result<Category, RerouteError> {
    if raw.name.trim().is_empty() {
        return Err(RerouteError::Config(
            "category with empty name".to_string(),
        ));
    }

    let keywords: Vec<String> = raw
        .keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    if keywords.is_empty() {
        return Err(RerouteError::Config(format!(
            "category {:?} has no keywords",
            raw.name
        )));
    }

    if raw.landing.is_empty() {
        return Err(RerouteError::Config(format!(
            "category {:?} has no landing pages",
            raw.name
        )));
    }

    let mut landing = Vec::with_capacity(raw.landing.len());
    for (key, target) in &raw.landing {
        let tag = LanguageTag::new(key).ok_or_else(|| {
            RerouteError::Config(format!(
                "category {:?}: invalid landing language {key:?}",
                raw.name
            ))
        })?;
        if tag != languages.default && !languages.supported.contains(&tag) {
            return Err(RerouteError::Config(format!(
                "category {:?}: landing language {} is not configured",
                raw.name,
                tag.as_str()
            )));
        }
        let path = CanonicalPath::normalize(target);
        if !path.is_valid() {
            return Err(RerouteError::Config(format!(
                "category {:?}: landing page {target:?} is not a valid path",
                raw.name
            )));
        }
        landing.push((tag, path));
    }

    Ok(Category {
        name: raw.name.clone(),
        keywords,
        landing,
    })
}

/// Validated, typed configuration the engine runs with.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub languages: Languages,
    pub min_ratio: f64,
    pub categories: Vec<Category>,
}

/// The configured closed set of language tags, in priority order.
#[derive(Debug, Clone)]
pub struct Languages {
    supported: Vec<LanguageTag>,
    default: LanguageTag,
}

impl Languages {
    /// Assign the language of a path: the first supported tag occurring as
    /// a substring, or the default tag. Scanning declaration order keeps
    /// classification reproducible regardless of how the tags were stored.
    pub fn classify(&self, path: &CanonicalPath) -> &LanguageTag {
        self.supported
            .iter()
            .find(|tag| tag.matches(path))
            .unwrap_or(&self.default)
    }

    pub fn supported(&self) -> &[LanguageTag] {
        &self.supported
    }

    pub fn default_tag(&self) -> &LanguageTag {
        &self.default
    }
}

/// A compiled category override rule.
#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    keywords: Vec<String>,
    landing: Vec<(LanguageTag, CanonicalPath)>,
}

impl Category {
    /// Substring keyword match so that pluralized or suffixed segments
    /// (`/habitaciones/`) still hit the singular keyword.
    pub fn matches(&self, path: &CanonicalPath) -> bool {
        self.keywords.iter().any(|k| path.contains(k))
    }

    pub fn landing_for(&self, tag: &LanguageTag) -> Option<&CanonicalPath> {
        self.landing
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, path)| path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_languages(supported: &[&str], default: &str) -> EngineConfig {
        EngineConfig {
            languages: LanguagesConfig {
                supported: supported.iter().map(|s| s.to_string()).collect(),
                default: default.to_string(),
            },
            ..EngineConfig::default()
        }
    }

    #[test]
    fn default_config_compiles() {
        let rules = EngineConfig::default().compile().unwrap();
        assert_eq!(rules.languages.supported().len(), 3);
        assert!(rules.languages.default_tag().is_root());
        assert_eq!(rules.min_ratio, DEFAULT_MIN_RATIO);
        assert!(rules.categories.is_empty());
    }

    #[test]
    fn empty_supported_is_config_error() {
        let err = config_with_languages(&[], "/").compile().unwrap_err();
        assert!(matches!(err, RerouteError::Config(_)));
    }

    #[test]
    fn root_in_supported_is_config_error() {
        let err = config_with_languages(&["/", "/en/"], "/")
            .compile()
            .unwrap_err();
        assert!(err.to_string().contains("root tag"));
    }

    #[test]
    fn duplicate_supported_is_config_error() {
        let err = config_with_languages(&["/en/", "en"], "/")
            .compile()
            .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn garbage_tag_is_config_error() {
        let err = config_with_languages(&["/en fr/"], "/")
            .compile()
            .unwrap_err();
        assert!(matches!(err, RerouteError::Config(_)));
    }

    #[test]
    fn min_ratio_out_of_range_is_config_error() {
        let mut config = EngineConfig::default();
        config.matching.min_ratio = 1.5;
        assert!(config.compile().is_err());
        config.matching.min_ratio = f64::NAN;
        assert!(config.compile().is_err());
    }

    #[test]
    fn classify_prefers_declaration_order() {
        let rules = config_with_languages(&["/en/", "/enormous/"], "/")
            .compile()
            .unwrap();
        // Both tags are substrings of this path; the earlier one wins.
        let path = CanonicalPath::normalize("/enormous/en/page/");
        assert_eq!(rules.languages.classify(&path).as_str(), "/en/");
    }

    #[test]
    fn classify_falls_back_to_default() {
        let rules = EngineConfig::default().compile().unwrap();
        let path = CanonicalPath::normalize("/habitacion-king/");
        assert!(rules.languages.classify(&path).is_root());
    }

    #[test]
    fn classify_tags_unsupported_language_as_default() {
        let rules = config_with_languages(&["/en/"], "/").compile().unwrap();
        let path = CanonicalPath::normalize("/de/unbekannt/");
        assert!(rules.languages.classify(&path).is_root());
    }

    fn rooms_category() -> CategoryConfig {
        CategoryConfig {
            name: "rooms".to_string(),
            keywords: vec!["habitacion".to_string(), "room".to_string()],
            landing: BTreeMap::from([
                ("/".to_string(), "/habitaciones/".to_string()),
                ("/en/".to_string(), "/en/rooms/".to_string()),
            ]),
        }
    }

    #[test]
    fn category_compiles_and_matches() {
        let mut config = config_with_languages(&["/en/", "/de/"], "/");
        config.categories.push(rooms_category());
        let rules = config.compile().unwrap();

        let cat = &rules.categories[0];
        assert!(cat.matches(&CanonicalPath::normalize("/habitaciones/doble/")));
        assert!(cat.matches(&CanonicalPath::normalize("/en/king-room/")));
        assert!(!cat.matches(&CanonicalPath::normalize("/en/contact/")));

        let en = LanguageTag::new("en").unwrap();
        assert_eq!(cat.landing_for(&en).unwrap().as_str(), "/en/rooms/");
        let de = LanguageTag::new("de").unwrap();
        assert!(cat.landing_for(&de).is_none());
    }

    #[test]
    fn category_without_keywords_is_config_error() {
        let mut config = config_with_languages(&["/en/"], "/");
        config.categories.push(CategoryConfig {
            name: "rooms".to_string(),
            keywords: vec!["  ".to_string()],
            landing: BTreeMap::from([("/".to_string(), "/rooms/".to_string())]),
        });
        assert!(config.compile().is_err());
    }

    #[test]
    fn category_without_landing_is_config_error() {
        let mut config = config_with_languages(&["/en/"], "/");
        let mut cat = rooms_category();
        cat.landing.clear();
        config.categories.push(cat);
        assert!(config.compile().is_err());
    }

    #[test]
    fn category_unknown_landing_language_is_config_error() {
        let mut config = config_with_languages(&["/en/"], "/");
        let mut cat = rooms_category();
        cat.landing
            .insert("/it/".to_string(), "/it/camere/".to_string());
        config.categories.push(cat);
        let err = config.compile().unwrap_err();
        assert!(err.to_string().contains("not configured"));
    }

    #[test]
    fn category_invalid_landing_path_is_config_error() {
        let mut config = config_with_languages(&["/en/"], "/");
        let mut cat = rooms_category();
        cat.landing.insert("/en/".to_string(), "   ".to_string());
        config.categories.push(cat);
        assert!(config.compile().is_err());
    }

    #[test]
    fn toml_round_trip() {
        let text = r#"
            [languages]
            supported = ["/en/", "/de/"]
            default = "/"

            [matching]
            min_ratio = 0.4

            [[categories]]
            name = "rooms"
            keywords = ["habitacion", "room"]
            [categories.landing]
            "/" = "/habitaciones/"
            "/en/" = "/en/rooms/"
        "#;
        let config: EngineConfig = toml::from_str(text).unwrap();
        let rules = config.compile().unwrap();
        assert_eq!(rules.min_ratio, 0.4);
        assert_eq!(rules.languages.supported().len(), 2);
        assert_eq!(rules.categories.len(), 1);
    }
}
