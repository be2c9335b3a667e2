//! Format extractors and the registry that routes documents to them.
//!
//! Plain text is always built in. The `pdf` and `docx` cargo features add
//! `PdfExtractor` and `DocxExtractor` to the default registry. Hosts can
//! implement [`TextExtractor`] for anything else, or to replace a built-in
//! reader, and [`register`](ExtractorRegistry::register) it at startup.
//!
//! ```rust
//! use std::sync::Arc;
//! use ingest::{DocumentFormat, ExtractorRegistry, IngestError, TextExtractor};
//!
//! struct UpperPdf;
//!
//! impl TextExtractor for UpperPdf {
//!     fn format(&self) -> DocumentFormat {
//!         DocumentFormat::Pdf
//!     }
//!
//!     fn extract(&self, bytes: &[u8]) -> Result<String, IngestError> {
//!         Ok(String::from_utf8_lossy(bytes).to_uppercase())
//!     }
//! }
//!
//! let mut registry = ExtractorRegistry::empty();
//! registry.register(Arc::new(UpperPdf));
//! assert!(registry.supports(DocumentFormat::Pdf));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::IngestError;
use crate::types::DocumentFormat;

/// Turns the bytes of one document format into text.
///
/// Implementations must not alter the text they extract beyond what the
/// format requires; normalization happens downstream.
pub trait TextExtractor: Send + Sync {
    fn format(&self) -> DocumentFormat;

    fn extract(&self, bytes: &[u8]) -> Result<String, IngestError>;
}

/// Strict UTF-8 decoder for `.txt` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Txt
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, IngestError> {
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|e| IngestError::InvalidUtf8(e.to_string()))
    }
}

/// Format → extractor table. Built once, then shared read-only.
#[derive(Clone)]
pub struct ExtractorRegistry {
    extractors: HashMap<DocumentFormat, Arc<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    /// A registry with no extractors at all.
    pub fn empty() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// Add an extractor, replacing any previous one for the same format.
    pub fn register(&mut self, extractor: Arc<dyn TextExtractor>) -> &mut Self {
        self.extractors.insert(extractor.format(), extractor);
        self
    }

    pub fn get(&self, format: DocumentFormat) -> Option<&Arc<dyn TextExtractor>> {
        self.extractors.get(&format)
    }

    pub fn supports(&self, format: DocumentFormat) -> bool {
        self.extractors.contains_key(&format)
    }

    /// Extract `bytes` with the extractor registered for `format`.
    pub fn extract(&self, format: DocumentFormat, bytes: &[u8]) -> Result<String, IngestError> {
        let extractor = self.get(format).ok_or_else(|| {
            IngestError::UnsupportedFileType(format!("no extractor registered for {format}"))
        })?;
        extractor.extract(bytes)
    }
}

impl Default for ExtractorRegistry {
    /// Plain text plus whichever of the PDF and DOCX readers are compiled in.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(PlainTextExtractor));
        #[cfg(feature = "pdf")]
        registry.register(Arc::new(crate::pdf::PdfExtractor));
        #[cfg(feature = "docx")]
        registry.register(Arc::new(crate::docx::DocxExtractor));
        registry
    }
}

impl fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formats: Vec<&str> = self.extractors.keys().map(|k| k.as_str()).collect();
        formats.sort_unstable();
        f.debug_struct("ExtractorRegistry")
            .field("formats", &formats)
            .finish()
    }
}
