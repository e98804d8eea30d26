use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported file format: {extension}. Supported: {supported}")]
    UnsupportedFormat { extension: String, supported: String },

    #[error("Text extraction failed for {path}: {reason}")]
    Extraction { path: String, reason: String },

    #[error("Enhancement provider error: {0}")]
    Enhance(String),

    #[error("Invalid skill taxonomy: {0}")]
    InvalidTaxonomy(String),
}

pub type Result<T> = std::result::Result<T, ParserError>;
