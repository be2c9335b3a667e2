//! Error types produced by the ingest crate.
//!
//! All errors are typed, cloneable and comparable so callers can branch on
//! the failure kind instead of matching message strings.
//!
//! # Error Categories
//!
//! | Error | Category | Description |
//! |-------|----------|-------------|
//! | [`UnsupportedFileType`](IngestError::UnsupportedFileType) | Routing | Unknown extension or no extractor registered |
//! | [`InvalidUtf8`](IngestError::InvalidUtf8) | Extraction | Plain-text bytes are not valid UTF-8 |
//! | [`ExtractionFailed`](IngestError::ExtractionFailed) | Extraction | A format extractor could not read the document |
//! | [`PayloadTooLarge`](IngestError::PayloadTooLarge) | Validation | Size limit exceeded |
//! | [`Io`](IngestError::Io) | I/O | Reading the file failed |
//! | [`InvalidConfig`](IngestError::InvalidConfig) | Configuration | Rejected by [`IngestConfig::validate`](crate::IngestConfig::validate) |
//!
//! # Examples
//!
//! ```rust
//! use ingest::{ingest, ExtractorRegistry, IngestConfig, IngestError, RawDocument};
//!
//! let raw = RawDocument::new("notes.odt", b"hello".to_vec());
//! match ingest(raw, &ExtractorRegistry::default(), &IngestConfig::default()) {
//!     Ok(doc) => println!("extracted {} chars", doc.text.len()),
//!     Err(IngestError::UnsupportedFileType(ext)) => println!("cannot read .{ext} files"),
//!     Err(e) => println!("error: {e}"),
//! }
//! ```
use thiserror::Error;

use crate::types::DocumentFormat;

/// Errors that can occur while turning a document into text.
///
/// Marked `#[non_exhaustive]`; include a catch-all arm when matching.
///
/// ```rust
/// use ingest::{DocumentFormat, IngestError};
///
/// let err = IngestError::ExtractionFailed {
///     format: DocumentFormat::Pdf,
///     message: "encrypted document".into(),
/// };
/// assert_eq!(err.to_string(), "failed to extract text from pdf: encrypted document");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IngestError {
    /// The file extension is unknown, missing, or has no registered extractor.
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// Plain-text payload was not valid UTF-8.
    #[error("invalid utf-8 payload: {0}")]
    InvalidUtf8(String),

    /// A format extractor failed on the document bytes.
    #[error("failed to extract text from {format}: {message}")]
    ExtractionFailed {
        format: DocumentFormat,
        message: String,
    },

    /// Payload exceeds the configured byte limit.
    #[error("payload exceeds size limit: {0}")]
    PayloadTooLarge(String),

    /// Reading the document from disk failed.
    #[error("i/o error: {0}")]
    Io(String),

    /// Ingest configuration rejected.
    #[error("invalid ingest config: {0}")]
    InvalidConfig(String),
}

impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        IngestError::Io(err.to_string())
    }
}
