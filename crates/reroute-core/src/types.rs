use std::cmp::Ordering;
use std::fmt;

/// A normalized site path: lowercase, path component only, exactly one
/// leading and one trailing slash. Raw input that cannot be interpreted as
/// a path at all becomes the `Invalid` sentinel instead of an error, so
/// normalization is total and malformed records keep flowing through the
/// pipeline.
///
/// `as_str` returns the canonical string form (empty for `Invalid`, which
/// makes re-normalization a fixpoint); `Display` shows the `INVALID`
/// sentinel for human-facing output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CanonicalPath {
    Path(String),
    Invalid,
}

impl CanonicalPath {
    /// Normalize a raw URL or path string into canonical form.
    ///
    /// Steps: trim; cut query/fragment; lowercase; strip `scheme://host`
    /// and protocol-relative `//host` prefixes; force a single leading and
    /// trailing slash. Returns `Invalid` when the input is empty, contains
    /// interior whitespace or control characters, or has no path component
    /// left after the host is removed. Idempotent over its own output.
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Invalid;
        }
        if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Self::Invalid;
        }

        // Query and fragment are not part of the path component.
        let cut = trimmed
            .find(['?', '#'])
            .map_or(trimmed, |i| &trimmed[..i]);
        let lower = cut.to_lowercase();

        // `scheme://host/path` keeps only `/path`; `//host/path` is
        // protocol-relative and treated the same way. A `://` past the
        // first slash is path data, not a scheme separator.
        let scheme = lower.find("://").filter(|&i| !lower[..i].contains('/'));
        let path = if let Some(i) = scheme {
            after_authority(&lower[i + 3..])
        } else if let Some(rest) = lower.strip_prefix("//") {
            after_authority(rest)
        } else {
            lower.as_str()
        };

        if path.is_empty() {
            return Self::Invalid;
        }

        // Leading runs of slashes (a doubled separator after the host)
        // collapse to the single canonical one.
        let core = path.trim_start_matches('/').trim_end_matches('/');
        if core.is_empty() {
            return Self::root();
        }
        let mut canonical = String::with_capacity(core.len() + 2);
        canonical.push('/');
        canonical.push_str(core);
        canonical.push('/');
        Self::Path(canonical)
    }

    /// The site root `/`.
    pub fn root() -> Self {
        Self::Path("/".to_string())
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Path(_))
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Self::Path(p) if p == "/")
    }

    /// Canonical string form; empty for `Invalid`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Path(p) => p,
            Self::Invalid => "",
        }
    }

    /// Substring test against the canonical form; always false for `Invalid`.
    pub fn contains(&self, needle: &str) -> bool {
        match self {
            Self::Path(p) => p.contains(needle),
            Self::Invalid => false,
        }
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => f.write_str(p),
            Self::Invalid => f.write_str("INVALID"),
        }
    }
}

/// Drop the authority part of a URL remainder: everything before the first
/// `/`. `host.example` with no slash leaves nothing.
fn after_authority(rest: &str) -> &str {
    rest.find('/').map_or("", |i| &rest[i..])
}

/// A language prefix such as `/en/`, or the root tag `/` for paths in the
/// site's untranslated default language. A path has exactly one tag; the
/// classifier assigns the first configured tag that occurs as a substring.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Build a tag from a config value, accepting `en`, `/en`, `en/`, or
    /// `/en/` and normalizing to the `/en/` form. `/` yields the root tag.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim().trim_matches('/').to_lowercase();
        if trimmed.is_empty() {
            return if raw.trim() == "/" {
                Some(Self::root())
            } else {
                None
            };
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return None;
        }
        Some(Self(format!("/{trimmed}/")))
    }

    /// The "no language" tag for untranslated paths.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substring match against a canonical path. `Invalid` never matches.
    pub fn matches(&self, path: &CanonicalPath) -> bool {
        path.contains(&self.0)
    }

    /// The landing page for this language: the tag itself as a path
    /// (`/en/` for English, `/` for the root tag).
    pub fn home_path(&self) -> CanonicalPath {
        CanonicalPath::Path(self.0.clone())
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Three-signal comparison key for one old-path/candidate pair, compared
/// lexicographically most-significant first:
///
/// - `hierarchy`: positions where both token sequences agree (structure)
/// - `shared`: distinct tokens present on both sides (vocabulary)
/// - `ratio`: normalized string similarity in [0, 1] (continuous tie-break)
///
/// `ratio` is always finite, so a total ordering is implemented on top of
/// `f64::total_cmp`.
#[derive(Debug, Clone, Copy)]
pub struct ScoreTuple {
    pub hierarchy: usize,
    pub shared: usize,
    pub ratio: f64,
}

impl ScoreTuple {
    pub const ZERO: ScoreTuple = ScoreTuple {
        hierarchy: 0,
        shared: 0,
        ratio: 0.0,
    };

    /// Whether the pair overlaps structurally at all. Ratio-only matches
    /// fail this test and are never accepted as Direct.
    pub fn has_structural_overlap(&self) -> bool {
        self.hierarchy > 0 || self.shared > 0
    }
}

impl PartialEq for ScoreTuple {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoreTuple {}

impl PartialOrd for ScoreTuple {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoreTuple {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hierarchy
            .cmp(&other.hierarchy)
            .then_with(|| self.shared.cmp(&other.shared))
            .then_with(|| self.ratio.total_cmp(&other.ratio))
    }
}

/// The strategy level that produced a match, from strongest to weakest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchTier {
    /// Ranked best candidate with structural token overlap.
    Direct,
    /// Best same-language candidate sharing at least one token.
    SameLanguage,
    /// Configured category landing page.
    CategoryOverride,
    /// Best candidate by similarity ratio, language ignored.
    CrossLanguage,
    /// Home page for the path's language; always available.
    LanguageHome,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::SameLanguage => "same-language",
            Self::CategoryOverride => "category-override",
            Self::CrossLanguage => "cross-language",
            Self::LanguageHome => "language-home",
        }
    }

    /// All tiers in strength order, for histograms and reports.
    pub fn all() -> [MatchTier; 5] {
        [
            Self::Direct,
            Self::SameLanguage,
            Self::CategoryOverride,
            Self::CrossLanguage,
            Self::LanguageHome,
        ]
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One resolved redirect: the caller's raw old path echoed back, the
/// canonical target it maps to, the tier that produced it, and the score
/// of the pair. Batch output preserves input order, one result per input.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub old: String,
    pub resolved: CanonicalPath,
    pub tier: MatchTier,
    pub score: ScoreTuple,
}
