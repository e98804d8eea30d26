//! File-format text extraction.
//!
//! The parsing engine consumes plain text; these collaborators turn files
//! into text. Unsupported extensions are an input error, reported before the
//! engine ever runs.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ParserError, Result};

pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "text", "md", "pdf"];

/// A format-specific `path -> text` collaborator.
pub trait TextExtractor {
    fn supports(&self, extension: &str) -> bool;
    fn extract(&self, path: &Path) -> Result<String>;
}

/// UTF-8 text files, with lossy decoding for stray bytes.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn supports(&self, extension: &str) -> bool {
        matches!(extension, "txt" | "text" | "md")
    }

    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// PDF files via `pdf-extract`.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn supports(&self, extension: &str) -> bool {
        extension == "pdf"
    }

    fn extract(&self, path: &Path) -> Result<String> {
        pdf_extract::extract_text(path).map_err(|e| ParserError::Extraction {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Extracts text from a file, dispatching on its extension.
pub fn extract_text(path: &Path) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let extractors: [&dyn TextExtractor; 2] = [&PlainTextExtractor, &PdfExtractor];
    for extractor in extractors {
        if extractor.supports(&extension) {
            debug!(path = %path.display(), extension = %extension, "extracting text");
            return extractor.extract(path);
        }
    }
    Err(ParserError::UnsupportedFormat {
        extension,
        supported: SUPPORTED_EXTENSIONS.join(", "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_plain_text_round_trip() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "John Smith").unwrap();
        let text = extract_text(file.path()).expect("should extract");
        assert!(text.contains("John Smith"));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = extract_text(Path::new("resume.docx")).unwrap_err();
        assert!(matches!(err, ParserError::UnsupportedFormat { .. }));
        assert!(err.to_string().contains("docx"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = extract_text(Path::new("/nonexistent/resume.txt")).unwrap_err();
        assert!(matches!(err, ParserError::Io(_)));
    }
}
