//! Text extraction from PDF documents

use crate::error::{Result, ResumeRelevanceError};
use log::{debug, warn};
use std::panic::{self, AssertUnwindSafe};

/// Extract lowercased text from an in-memory PDF.
///
/// Pages are concatenated in document order with no delimiter between them.
/// The parsed document lives only for the duration of this call.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    // pdf-extract panics on some malformed inputs instead of returning an error
    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|_| ResumeRelevanceError::DocumentParse("PDF parser aborted on malformed input".to_string()))?
    .map_err(|e| ResumeRelevanceError::DocumentParse(format!("Failed to extract text from PDF: {}", e)))?;

    debug!("Extracted {} page(s) from PDF", pages.len());

    let text = join_pages(&pages);
    if text.trim().is_empty() {
        warn!("PDF contained no extractable text (scanned or image-only?)");
    }
    Ok(text)
}

/// Concatenate page texts in order, with nothing inserted between pages, and lowercase.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|page| page.as_ref().to_lowercase())
        .collect()
}
