//! Input manager: the PDF-only upload gate in front of the extractor

use crate::error::{Result, ResumeRelevanceError};
use crate::input::file_detector::{has_pdf_magic, FileType};
use crate::input::text_extractor::extract_pdf_text;
use log::info;
use std::path::Path;
use tokio::fs;

#[derive(Default)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Read a file and accept it only if it looks like a PDF.
    pub async fn read_pdf(&self, path: &Path) -> Result<Vec<u8>> {
        if !path.exists() {
            return Err(ResumeRelevanceError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        if FileType::from_path(path) != FileType::Pdf {
            return Err(ResumeRelevanceError::UnsupportedFormat(format!(
                "Only PDF uploads are accepted: {}",
                path.display()
            )));
        }

        let bytes = fs::read(path).await?;
        if !has_pdf_magic(&bytes) {
            return Err(ResumeRelevanceError::UnsupportedFormat(format!(
                "File does not contain PDF data: {}",
                path.display()
            )));
        }

        info!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(bytes)
    }

    /// Read and extract a PDF in one step.
    pub async fn extract_text(&self, path: &Path) -> Result<String> {
        let bytes = self.read_pdf(path).await?;
        info!("Extracting text from PDF: {}", path.display());
        extract_pdf_text(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_nonexistent_file() {
        let manager = InputManager::new();
        let result = manager.read_pdf(Path::new("does/not/exist.pdf")).await;
        assert!(matches!(result, Err(ResumeRelevanceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_rejects_non_pdf_extension() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"python and sql").unwrap();

        let result = InputManager::new().read_pdf(file.path()).await;
        assert!(matches!(result, Err(ResumeRelevanceError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn test_rejects_pdf_extension_without_magic() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"<html>not a pdf</html>").unwrap();

        let result = InputManager::new().read_pdf(file.path()).await;
        assert!(matches!(result, Err(ResumeRelevanceError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_parse_error() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"%PDF-1.4\ngarbage without objects").unwrap();

        let result = InputManager::new().extract_text(file.path()).await;
        assert!(matches!(result, Err(ResumeRelevanceError::DocumentParse(_))));
    }
}
