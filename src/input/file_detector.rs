//! File type detection

use std::path::Path;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Clone, PartialEq)]
pub enum FileType {
    Pdf,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            _ => FileType::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }
}

/// True if the buffer starts with the PDF header
pub fn has_pdf_magic(head: &[u8]) -> bool {
    head.starts_with(PDF_MAGIC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_detection() {
        assert_eq!(FileType::from_extension("PDF"), FileType::Pdf);
        assert_eq!(FileType::from_extension("docx"), FileType::Unknown);
        assert_eq!(FileType::from_path(Path::new("cv.final.pdf")), FileType::Pdf);
        assert_eq!(FileType::from_path(Path::new("resume")), FileType::Unknown);
    }

    #[test]
    fn test_magic_bytes() {
        assert!(has_pdf_magic(b"%PDF-1.7\n%\xe2\xe3"));
        assert!(!has_pdf_magic(b"PK\x03\x04"));
        assert!(!has_pdf_magic(b""));
    }
}
