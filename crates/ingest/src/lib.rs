//! Plagscan Ingest Layer
//!
//! This is where documents enter the pipeline. We take a file name and its
//! bytes, pick an extractor from the extension, enforce the size cap and hand
//! back the extracted text untouched.
//!
//! ## What we do here
//!
//! - **Route by format** - `.txt`, `.pdf` and `.docx` are recognised, case
//!   insensitively. Anything else is [`IngestError::UnsupportedFileType`].
//! - **Enforce size limits** - oversized payloads are rejected before any
//!   extraction work.
//! - **Extract** - through the [`TextExtractor`] registered for the format.
//!   Plain text is always available. PDF (all pages, in order) and DOCX
//!   (body paragraphs, one per line) need the `pdf` and `docx` features.
//! - **Log everything** - structured `ingest_success` / `ingest_failure`
//!   events via tracing.
//!
//! Empty extractions are returned as-is; deciding what to do with them is the
//! caller's job.
//!
//! ## Example
//!
//! ```
//! use ingest::{ingest, DocumentFormat, ExtractorRegistry, IngestConfig, RawDocument};
//!
//! let raw = RawDocument::text("essay.txt", "The quick, quick fox runs.");
//! let doc = ingest(raw, &ExtractorRegistry::default(), &IngestConfig::default()).unwrap();
//!
//! assert_eq!(doc.format, DocumentFormat::Txt);
//! assert_eq!(doc.text, "The quick, quick fox runs.");
//! ```
//!
use std::path::Path;
use std::time::Instant;

use tracing::{info, warn, Level};

mod config;
#[cfg(feature = "docx")]
mod docx;
mod error;
mod extract;
#[cfg(feature = "pdf")]
mod pdf;
mod types;

pub use crate::config::{IngestConfig, DEFAULT_MAX_PAYLOAD_BYTES};
#[cfg(feature = "docx")]
pub use crate::docx::{DocxExtractor, MAX_DOCUMENT_XML_BYTES};
pub use crate::error::IngestError;
pub use crate::extract::{ExtractorRegistry, PlainTextExtractor, TextExtractor};
#[cfg(feature = "pdf")]
pub use crate::pdf::PdfExtractor;
pub use crate::types::{DocumentFormat, ExtractedDocument, RawDocument};

/// Ingest an in-memory document: detect format, check size, extract text.
pub fn ingest(
    raw: RawDocument,
    registry: &ExtractorRegistry,
    cfg: &IngestConfig,
) -> Result<ExtractedDocument, IngestError> {
    let start = Instant::now();
    let span = tracing::span!(Level::INFO, "ingest.ingest", name = %raw.name);
    let _guard = span.enter();

    let name = raw.name.clone();
    match ingest_inner(raw, registry, cfg) {
        Ok(doc) => {
            let elapsed_micros = start.elapsed().as_micros();
            info!(
                format = %doc.format,
                byte_len = doc.byte_len,
                text_len = doc.text.len(),
                elapsed_micros,
                "ingest_success"
            );
            Ok(doc)
        }
        Err(err) => {
            let elapsed_micros = start.elapsed().as_micros();
            warn!(name = %name, error = %err, elapsed_micros, "ingest_failure");
            Err(err)
        }
    }
}

/// Read a document from disk and ingest it.
///
/// The report name is the file name component of `path`. The size cap is
/// checked against file metadata before the contents are read.
pub fn ingest_file(
    path: impl AsRef<Path>,
    registry: &ExtractorRegistry,
    cfg: &IngestConfig,
) -> Result<ExtractedDocument, IngestError> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let bytes = match read_capped(path, cfg) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(name = %name, path = %path.display(), error = %err, "ingest_failure");
            return Err(err);
        }
    };

    ingest(RawDocument::new(name, bytes), registry, cfg)
}

fn read_capped(path: &Path, cfg: &IngestConfig) -> Result<Vec<u8>, IngestError> {
    let len = std::fs::metadata(path)?.len();
    cfg.check_size(len)?;
    Ok(std::fs::read(path)?)
}

fn ingest_inner(
    raw: RawDocument,
    registry: &ExtractorRegistry,
    cfg: &IngestConfig,
) -> Result<ExtractedDocument, IngestError> {
    let RawDocument { name, bytes } = raw;

    let format = DocumentFormat::from_name(&name)?;
    // Reject oversized payloads before extraction.
    cfg.check_size(bytes.len() as u64)?;
    let text = registry.extract(format, &bytes)?;

    Ok(ExtractedDocument {
        name,
        format,
        text,
        byte_len: bytes.len(),
    })
}
