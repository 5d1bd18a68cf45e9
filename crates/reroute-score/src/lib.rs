//! Similarity scoring and the layered redirect resolution engine.

mod candidates;
mod engine;
mod fallback;
mod ranker;
mod similarity;
mod tokenizer;

pub use candidates::{Candidate, CandidateSet, OldPath};
pub use engine::Engine;
pub use fallback::FallbackChain;
pub use ranker::Ranker;
pub use similarity::SimilarityScorer;
pub use tokenizer::Tokenizer;
