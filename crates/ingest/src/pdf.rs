//! PDF extraction: the text of every page, concatenated in page order.

use lopdf::Document;

use crate::error::IngestError;
use crate::extract::TextExtractor;
use crate::types::DocumentFormat;

/// Reads page text out of a PDF with `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, IngestError> {
        let document = Document::load_mem(bytes).map_err(failed)?;
        let mut text = String::new();
        for page in document.get_pages().into_keys() {
            text.push_str(&document.extract_text(&[page]).map_err(failed)?);
        }
        Ok(text)
    }
}

fn failed(err: lopdf::Error) -> IngestError {
    IngestError::ExtractionFailed {
        format: DocumentFormat::Pdf,
        message: err.to_string(),
    }
}
