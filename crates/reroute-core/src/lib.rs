//! Reroute core domain types, configuration, and errors.

mod config;
mod error;
mod types;

pub use config::{
    Category, CategoryConfig, EngineConfig, Languages, LanguagesConfig, MatchingConfig, RuleSet,
};
pub use error::RerouteError;
pub use types::{CanonicalPath, LanguageTag, MatchResult, MatchTier, ScoreTuple};
