use std::path::{Path, PathBuf};
use std::time::Instant;

use canonical::Normalizer;
use fingerprint::WindowFingerprint;
use ingest::{ExtractorRegistry, IngestConfig, RawDocument};
use matcher::{ComparisonResult, Matcher};
use rayon::prelude::*;
use tracing::{Level, info, warn};

use crate::config::PlagscanConfig;
use crate::report::{PairReport, ScanReport, ScanRow, SkippedFile};
use crate::{
    PipelineError, ProcessedDocument, normalize_observed, observe_compare, process_document,
    process_file,
};

/// A processed document together with its window fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedDocument {
    pub document: ProcessedDocument,
    pub fingerprint: WindowFingerprint,
}

/// Pairwise and one-to-many comparisons under one configuration.
///
/// Built once from a [`PlagscanConfig`]; every stage config is validated in
/// [`Scanner::new`], so later calls only fail on bad input documents.
///
/// ```
/// use plagscan::{PlagscanConfig, RawDocument, Scanner};
///
/// let scanner = Scanner::new(&PlagscanConfig::default()).unwrap();
/// let text = "Glaciers carve valleys slowly over thousands of years of movement.";
/// let report = scanner
///     .scan(
///         RawDocument::text("base.txt", text),
///         vec![RawDocument::text("copy.txt", text)],
///     )
///     .unwrap();
/// assert_eq!(report.rows[0].similarity_rate, "100.00%");
/// ```
#[derive(Debug, Clone)]
pub struct Scanner {
    normalizer: Normalizer,
    matcher: Matcher,
    registry: ExtractorRegistry,
    ingest_cfg: IngestConfig,
    parallel: bool,
}

impl Scanner {
    pub fn new(cfg: &PlagscanConfig) -> Result<Self, PipelineError> {
        let ingest_cfg = cfg.ingest.to_ingest_config();
        ingest_cfg.validate()?;
        let normalizer =
            Normalizer::new(cfg.canonical.to_normalize_config(), cfg.canonical.stop_words())?;
        let matcher = Matcher::new(cfg.matcher.to_match_config())?;

        Ok(Self {
            normalizer,
            matcher,
            registry: ExtractorRegistry::default(),
            ingest_cfg,
            parallel: cfg.scan.parallel,
        })
    }

    /// Replace the extractor registry, e.g. to add PDF or DOCX support.
    pub fn with_registry(mut self, registry: ExtractorRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry_mut(&mut self) -> &mut ExtractorRegistry {
        &mut self.registry
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Normalize and compare two raw strings.
    pub fn compare_texts(&self, a: &str, b: &str) -> Result<ComparisonResult, PipelineError> {
        let left = normalize_observed(&self.normalizer, a);
        let right = normalize_observed(&self.normalizer, b);
        observe_compare(|| self.matcher.compare(left.as_str(), right.as_str()))
    }

    /// Extract, normalize and fingerprint an in-memory document.
    pub fn prepare(&self, raw: RawDocument) -> Result<PreparedDocument, PipelineError> {
        let document = process_document(raw, &self.registry, &self.ingest_cfg, &self.normalizer)?;
        self.fingerprint(document)
    }

    /// Read, extract, normalize and fingerprint a document from disk.
    pub fn prepare_file(&self, path: impl AsRef<Path>) -> Result<PreparedDocument, PipelineError> {
        let document = process_file(path, &self.registry, &self.ingest_cfg, &self.normalizer)?;
        self.fingerprint(document)
    }

    fn fingerprint(&self, document: ProcessedDocument) -> Result<PreparedDocument, PipelineError> {
        let fingerprint = self
            .matcher
            .fingerprint(document.canonical.canonical.as_str())?;
        Ok(PreparedDocument {
            document,
            fingerprint,
        })
    }

    /// Compare two prepared documents.
    pub fn compare_prepared(
        &self,
        left: &PreparedDocument,
        right: &PreparedDocument,
    ) -> Result<PairReport, PipelineError> {
        let result = observe_compare(|| {
            self.matcher
                .compare_fingerprints(&left.fingerprint, &right.fingerprint)
        })?;
        Ok(PairReport {
            left: left.document.summary(),
            right: right.document.summary(),
            result,
        })
    }

    /// Compare two in-memory documents.
    pub fn compare_documents(
        &self,
        left: RawDocument,
        right: RawDocument,
    ) -> Result<PairReport, PipelineError> {
        let span = tracing::span!(Level::INFO, "plagscan.compare", left = %left.name, right = %right.name);
        let _guard = span.enter();

        let left = self.prepare(left)?;
        let right = self.prepare(right)?;
        self.compare_prepared(&left, &right)
    }

    /// Compare two documents on disk.
    pub fn compare_paths(
        &self,
        left: impl AsRef<Path>,
        right: impl AsRef<Path>,
    ) -> Result<PairReport, PipelineError> {
        let (left, right) = (left.as_ref(), right.as_ref());
        let span = tracing::span!(
            Level::INFO,
            "plagscan.compare",
            left = %left.display(),
            right = %right.display()
        );
        let _guard = span.enter();

        let left = self.prepare_file(left)?;
        let right = self.prepare_file(right)?;
        self.compare_prepared(&left, &right)
    }

    /// Compare one base document against every candidate.
    ///
    /// A base that cannot be prepared fails the whole scan. Candidates that
    /// fail are listed in [`ScanReport::skipped`] and the scan carries on.
    pub fn scan(
        &self,
        base: RawDocument,
        candidates: Vec<RawDocument>,
    ) -> Result<ScanReport, PipelineError> {
        let span = tracing::span!(Level::INFO, "plagscan.scan", base = %base.name, candidates = candidates.len());
        let _guard = span.enter();

        let base = self.prepare(base)?;
        Ok(self.scan_with(
            base,
            candidates,
            |raw| raw.name.clone(),
            |raw| self.prepare(raw),
        ))
    }

    /// [`scan`](Self::scan) over files on disk.
    pub fn scan_paths(
        &self,
        base: impl AsRef<Path>,
        candidates: &[PathBuf],
    ) -> Result<ScanReport, PipelineError> {
        let base = base.as_ref();
        let span = tracing::span!(Level::INFO, "plagscan.scan", base = %base.display(), candidates = candidates.len());
        let _guard = span.enter();

        let base = self.prepare_file(base)?;
        Ok(self.scan_with(
            base,
            candidates.iter().collect(),
            |path| display_name(path),
            |path| self.prepare_file(path),
        ))
    }

    fn scan_with<T, N, P>(
        &self,
        base: PreparedDocument,
        candidates: Vec<T>,
        name_of: N,
        prepare: P,
    ) -> ScanReport
    where
        T: Send,
        N: Fn(&T) -> String + Sync,
        P: Fn(T) -> Result<PreparedDocument, PipelineError> + Sync,
    {
        let start = Instant::now();
        let evaluate = |candidate: T| -> Result<(String, ComparisonResult), SkippedFile> {
            let filename = name_of(&candidate);
            prepare(candidate)
                .and_then(|doc| self.compare_prepared(&base, &doc))
                .map(|pair| (filename.clone(), pair.result))
                .map_err(|err| {
                    warn!(filename = %filename, error = %err, "scan_candidate_skipped");
                    SkippedFile {
                        filename,
                        reason: err.to_string(),
                    }
                })
        };

        // Collecting from an indexed parallel iterator keeps input order.
        let outcomes: Vec<_> = if self.parallel {
            candidates.into_par_iter().map(evaluate).collect()
        } else {
            candidates.into_iter().map(evaluate).collect()
        };

        let mut rows = Vec::new();
        let mut skipped = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok((filename, result)) => rows.push(ScanRow::new(rows.len() + 1, filename, result)),
                Err(skip) => skipped.push(skip),
            }
        }

        let report = ScanReport {
            base: base.document.summary(),
            rows,
            skipped,
        };
        info!(
            rows = report.rows.len(),
            flagged = report.flagged().count(),
            skipped = report.skipped.len(),
            elapsed_micros = start.elapsed().as_micros(),
            "scan_complete"
        );
        report
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
