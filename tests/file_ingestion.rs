//! Tests for the file ingestion collaborators feeding the parser.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use resume_parser::{ingest, ParserError, ResumeParser};

fn write_resume(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write resume file");
    path
}

#[test]
fn test_parse_file_reads_plain_text() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_resume(
        dir.path(),
        "resume.txt",
        "John Smith\njohn.smith@email.com\n(555) 123-4567",
    );

    let resume = ResumeParser::new().parse_file(&path).expect("parse should succeed");
    assert_eq!(resume.contact_info.name.as_deref(), Some("John Smith"));
    assert_eq!(resume.contact_info.email.as_deref(), Some("john.smith@email.com"));
}

#[test]
fn test_parse_file_matches_parse_text() {
    let content = "Jane Doe\njane@email.com\n\nEXPERIENCE\nEngineer at Acme\n01/2020 - Present";
    let dir = TempDir::new().expect("temp dir");
    let path = write_resume(dir.path(), "resume.md", content);

    let parser = ResumeParser::new();
    let from_file = parser.parse_file(&path).expect("parse should succeed");
    let from_text = parser.parse_text(content);
    assert_eq!(from_file, from_text);
}

#[test]
fn test_unsupported_extension_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_resume(dir.path(), "resume.docx", "irrelevant");

    let err = ResumeParser::new().parse_file(&path).unwrap_err();
    assert!(matches!(err, ParserError::UnsupportedFormat { .. }));
    let message = err.to_string();
    assert!(message.contains("docx"));
    assert!(message.contains("txt"));
}

#[test]
fn test_missing_file_is_an_input_error() {
    let err = ResumeParser::new()
        .parse_file(Path::new("/definitely/not/here.txt"))
        .unwrap_err();
    assert!(matches!(err, ParserError::Io(_)));
}

#[test]
fn test_extractor_supports_lists() {
    use resume_parser::ingest::TextExtractor;
    assert!(ingest::PlainTextExtractor.supports("txt"));
    assert!(ingest::PlainTextExtractor.supports("md"));
    assert!(!ingest::PlainTextExtractor.supports("pdf"));
    assert!(ingest::PdfExtractor.supports("pdf"));
    for extension in ingest::SUPPORTED_EXTENSIONS {
        assert!(
            ingest::PlainTextExtractor.supports(extension)
                || ingest::PdfExtractor.supports(extension)
        );
    }
}

#[test]
fn test_lossy_decoding_never_fails() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("resume.txt");
    fs::write(&path, [0x4a, 0x6f, 0x68, 0x6e, 0xff, 0xfe, 0x0a]).expect("write bytes");

    let resume = ResumeParser::new().parse_file(&path).expect("lossy decode should succeed");
    assert!(resume.raw_text.contains("John"));
}
