//! Keyword matching, semantic scoring and score aggregation

pub mod keyword_matcher;
pub mod embeddings;
pub mod embedding_manager;
pub mod analyzer;
