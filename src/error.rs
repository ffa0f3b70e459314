//! Error types for rs-article-sanitizer.
//!
//! This module defines the error types returned by sanitization and
//! extraction operations.

/// Error type for sanitization and extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The caller handed over something the operation cannot work on
    /// (a text node as sanitize root, an empty selection, a bad URL, ...).
    ///
    /// Raised before any mutation takes place.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// HTML parsing failed.
    #[error("HTML parsing failed: {0}")]
    ParseError(String),

    /// No extractable content was found in the document.
    #[error("No extractable content found")]
    NoContent,

    /// The article extraction step failed.
    #[error("Extraction failed: {0}")]
    ExtractionError(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidArgument(format!("policy configuration: {err}"))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidArgument(format!("source URL: {err}"))
    }
}

/// Result type alias for sanitization and extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
