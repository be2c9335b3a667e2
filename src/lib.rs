//! Workspace umbrella crate for plagscan, a document similarity engine.
//!
//! Documents flow through four stages, each its own crate:
//!
//! ```text
//! RawDocument ──ingest──▶ ExtractedDocument ──canonical──▶ CanonicalDocument
//!                                                               │
//!             ComparisonResult ◀──matcher── WindowFingerprint ◀─┘ fingerprint
//! ```
//!
//! This crate wires them together: [`process_document`] runs ingest and
//! normalization with metrics, [`compare_texts`] is the two-string shortcut,
//! and [`Scanner`] drives pairwise comparisons and one-to-many scans from a
//! [`PlagscanConfig`].
//!
//! ```
//! use plagscan::{compare_texts, MatchConfig};
//!
//! let essay = "The industrial revolution transformed manufacturing across Europe.";
//! let result = compare_texts(essay, essay, &MatchConfig::default()).unwrap();
//! assert_eq!(result.similarity_ratio, 1.0);
//! assert!(result.is_plagiarized);
//! ```

pub mod config;
mod report;
mod scanner;

pub use canonical::{
    CanonicalDocument, CanonicalError, CanonicalText, NormalizeConfig, Normalizer, StopWords,
    english_normalizer, normalize, stem,
};
pub use fingerprint::{
    DEFAULT_WINDOW_SIZE, FingerprintError, WindowConfig, WindowFingerprint, WindowHash,
    fingerprint_text,
};
pub use ingest::{
    DocumentFormat, ExtractedDocument, ExtractorRegistry, IngestConfig, IngestError,
    PlainTextExtractor, RawDocument, TextExtractor,
};
#[cfg(feature = "docx")]
pub use ingest::DocxExtractor;
#[cfg(feature = "pdf")]
pub use ingest::PdfExtractor;
pub use matcher::{ComparisonResult, MatchConfig, MatchError, Matcher};

pub use crate::config::{ConfigLoadError, PlagscanConfig};
pub use crate::report::{
    DocumentSummary, PairReport, ScanReport, ScanRow, SkippedFile, VERDICT_CLEAN,
    VERDICT_PLAGIARIZED,
};
pub use crate::scanner::{PreparedDocument, Scanner};

use std::error::Error;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

/// Errors that can occur while taking a document through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    Ingest(IngestError),
    Canonical(CanonicalError),
    Match(MatchError),
    /// Extraction succeeded but produced no text at all.
    EmptyDocument { name: String },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Ingest(err) => write!(f, "ingest failure: {err}"),
            PipelineError::Canonical(err) => write!(f, "normalization failure: {err}"),
            PipelineError::Match(err) => write!(f, "comparison failure: {err}"),
            PipelineError::EmptyDocument { name } => {
                write!(f, "no text could be extracted from {name}")
            }
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Ingest(err) => Some(err),
            PipelineError::Canonical(err) => Some(err),
            PipelineError::Match(err) => Some(err),
            PipelineError::EmptyDocument { .. } => None,
        }
    }
}

impl From<IngestError> for PipelineError {
    fn from(value: IngestError) -> Self {
        PipelineError::Ingest(value)
    }
}

impl From<CanonicalError> for PipelineError {
    fn from(value: CanonicalError) -> Self {
        PipelineError::Canonical(value)
    }
}

impl From<MatchError> for PipelineError {
    fn from(value: MatchError) -> Self {
        PipelineError::Match(value)
    }
}

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    fn record_ingest(&self, latency: Duration, result: Result<(), IngestError>);
    /// Normalization cannot fail; `token_count` is the canonical token count.
    fn record_normalize(&self, latency: Duration, token_count: usize);
    fn record_compare(&self, latency: Duration, result: Result<(), MatchError>);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

pub(crate) struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    pub(crate) fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_ingest(self, result: Result<(), IngestError>) {
        self.recorder.record_ingest(self.start.elapsed(), result);
    }

    fn record_normalize(self, token_count: usize) {
        self.recorder
            .record_normalize(self.start.elapsed(), token_count);
    }

    pub(crate) fn record_compare(self, result: Result<(), MatchError>) {
        self.recorder.record_compare(self.start.elapsed(), result);
    }
}

/// Run `compare` and report its outcome to the installed recorder.
pub(crate) fn observe_compare<F>(compare: F) -> Result<ComparisonResult, PipelineError>
where
    F: FnOnce() -> Result<ComparisonResult, MatchError>,
{
    let mut compare_metrics = MetricsSpan::start();
    match compare() {
        Ok(result) => {
            if let Some(span) = compare_metrics.take() {
                span.record_compare(Ok(()));
            }
            Ok(result)
        }
        Err(err) => {
            if let Some(span) = compare_metrics.take() {
                span.record_compare(Err(err.clone()));
            }
            Err(PipelineError::Match(err))
        }
    }
}

/// A document that has been extracted and normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedDocument {
    pub name: String,
    pub format: DocumentFormat,
    /// Size of the raw payload.
    pub byte_len: usize,
    pub canonical: CanonicalDocument,
}

impl ProcessedDocument {
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            name: self.name.clone(),
            format: self.format,
            token_count: self.canonical.token_count,
            canonical_sha256: self.canonical.sha256_hex.clone(),
        }
    }
}

/// Extract and normalize an in-memory document.
///
/// Empty extractions are rejected with [`PipelineError::EmptyDocument`].
/// Whitespace-only text is accepted and normalizes to an empty canonical text.
pub fn process_document(
    raw: RawDocument,
    registry: &ExtractorRegistry,
    ingest_cfg: &IngestConfig,
    normalizer: &Normalizer,
) -> Result<ProcessedDocument, PipelineError> {
    let extracted = observe_ingest(|| ingest::ingest(raw, registry, ingest_cfg))?;
    normalize_extracted(extracted, normalizer)
}

/// Read, extract and normalize a document from disk.
pub fn process_file(
    path: impl AsRef<Path>,
    registry: &ExtractorRegistry,
    ingest_cfg: &IngestConfig,
    normalizer: &Normalizer,
) -> Result<ProcessedDocument, PipelineError> {
    let extracted = observe_ingest(|| ingest::ingest_file(path, registry, ingest_cfg))?;
    normalize_extracted(extracted, normalizer)
}

/// Normalize text that has already been extracted.
pub fn normalize_extracted(
    extracted: ExtractedDocument,
    normalizer: &Normalizer,
) -> Result<ProcessedDocument, PipelineError> {
    if extracted.is_empty() {
        return Err(PipelineError::EmptyDocument {
            name: extracted.name,
        });
    }

    let mut normalize_metrics = MetricsSpan::start();
    let canonical = normalizer.canonicalize(extracted.name.as_str(), &extracted.text)?;
    if let Some(span) = normalize_metrics.take() {
        span.record_normalize(canonical.token_count);
    }

    Ok(ProcessedDocument {
        name: extracted.name,
        format: extracted.format,
        byte_len: extracted.byte_len,
        canonical,
    })
}

/// Normalize two raw texts with the default English normalizer and compare
/// them under `cfg`.
pub fn compare_texts(
    a: &str,
    b: &str,
    cfg: &MatchConfig,
) -> Result<ComparisonResult, PipelineError> {
    let normalizer = english_normalizer();
    let left = normalize_observed(normalizer, a);
    let right = normalize_observed(normalizer, b);
    observe_compare(|| matcher::compare(left.as_str(), right.as_str(), cfg))
}

pub(crate) fn normalize_observed(normalizer: &Normalizer, text: &str) -> CanonicalText {
    let mut normalize_metrics = MetricsSpan::start();
    let canonical = normalizer.normalize(text);
    if let Some(span) = normalize_metrics.take() {
        span.record_normalize(canonical.tokens().count());
    }
    canonical
}

fn observe_ingest<F>(ingest: F) -> Result<ExtractedDocument, PipelineError>
where
    F: FnOnce() -> Result<ExtractedDocument, IngestError>,
{
    let mut ingest_metrics = MetricsSpan::start();
    match ingest() {
        Ok(doc) => {
            if let Some(span) = ingest_metrics.take() {
                span.record_ingest(Ok(()));
            }
            Ok(doc)
        }
        Err(err) => {
            if let Some(span) = ingest_metrics.take() {
                span.record_ingest(Err(err.clone()));
            }
            Err(PipelineError::Ingest(err))
        }
    }
}
