//! Resume relevance checker library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::Config;
pub use error::{Result, ResumeRelevanceError};
pub use processing::analyzer::{aggregate, hard_match_score, RelevancePipeline, ScoreResult, Verdict};
pub use processing::embedding_manager::ModelHandle;
pub use processing::embeddings::{SemanticScorer, SentenceEmbedder};
pub use processing::keyword_matcher::{KeywordMatcher, SKILL_VOCABULARY};
