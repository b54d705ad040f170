//! Error handling for the resume relevance checker

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeRelevanceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The uploaded file is not a parseable PDF. The user has to upload a valid file.
    #[error("Document parse error: {0}")]
    DocumentParse(String),

    /// The embedding model could not be initialized. Semantic scoring is unavailable.
    #[error("Model loading error: {0}")]
    ModelLoad(String),

    #[error("Embedding generation error: {0}")]
    Embedding(String),

    #[error("Text processing error: {0}")]
    TextProcessing(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeRelevanceError>;

/// Convert candle core errors to our custom error type
impl From<candle_core::Error> for ResumeRelevanceError {
    fn from(err: candle_core::Error) -> Self {
        ResumeRelevanceError::Embedding(err.to_string())
    }
}

impl ResumeRelevanceError {
    /// Errors the user can fix by supplying a different file.
    pub fn is_upload_rejection(&self) -> bool {
        matches!(
            self,
            ResumeRelevanceError::DocumentParse(_)
                | ResumeRelevanceError::UnsupportedFormat(_)
                | ResumeRelevanceError::InvalidInput(_)
        )
    }
}
