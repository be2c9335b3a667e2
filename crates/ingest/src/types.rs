//! Core data model types for the ingest crate.
//!
//! ```text
//! RawDocument
//! ├── name: String        (file name; its extension selects the format)
//! └── bytes: Vec<u8>
//!
//!         ↓ ingest()
//!
//! ExtractedDocument
//! ├── name: String
//! ├── format: DocumentFormat
//! ├── text: String        (exactly what the extractor produced)
//! └── byte_len: usize     (size of the raw payload)
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::IngestError;

/// Document formats the pipeline knows how to route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Txt,
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Map a file extension (without the dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(DocumentFormat::Txt),
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            _ => None,
        }
    }

    /// Detect the format of a file name or path from its extension.
    pub fn from_name(name: &str) -> Result<Self, IngestError> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| IngestError::UnsupportedFileType(format!("{name} has no extension")))?;
        Self::from_extension(ext).ok_or_else(|| IngestError::UnsupportedFileType(ext.to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Txt => "txt",
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document before extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl RawDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Convenience constructor for an in-memory `.txt` document.
    pub fn text(name: impl Into<String>, text: &str) -> Self {
        Self::new(name, text.as_bytes().to_vec())
    }
}

/// A document after extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub name: String,
    pub format: DocumentFormat,
    pub text: String,
    pub byte_len: usize,
}

impl ExtractedDocument {
    /// True when extraction produced no text at all.
    ///
    /// Whitespace-only text is not empty; it normalizes to an empty canonical
    /// text and scores zero similarity downstream.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_detection_is_case_insensitive() {
        assert_eq!(DocumentFormat::from_name("essay.TXT"), Ok(DocumentFormat::Txt));
        assert_eq!(DocumentFormat::from_name("dir/report.Pdf"), Ok(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_name("thesis.docx"), Ok(DocumentFormat::Docx));
    }

    #[test]
    fn unknown_or_missing_extension_rejected() {
        assert_eq!(
            DocumentFormat::from_name("notes.odt"),
            Err(IngestError::UnsupportedFileType("odt".into()))
        );
        assert!(matches!(
            DocumentFormat::from_name("README"),
            Err(IngestError::UnsupportedFileType(_))
        ));
    }

    #[test]
    fn format_serializes_lowercase() {
        let json = serde_json::to_string(&DocumentFormat::Docx).unwrap();
        assert_eq!(json, "\"docx\"");
        assert_eq!(DocumentFormat::Pdf.to_string(), "pdf");
    }

    #[test]
    fn whitespace_only_text_is_not_empty() {
        let mut doc = ExtractedDocument {
            name: "a.txt".into(),
            format: DocumentFormat::Txt,
            text: " \n\t".into(),
            byte_len: 3,
        };
        assert!(!doc.is_empty());
        doc.text.clear();
        assert!(doc.is_empty());
    }
}
