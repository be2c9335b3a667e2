use fingerprint::{FingerprintError, WindowConfig, DEFAULT_WINDOW_SIZE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for pairwise comparison.
///
/// `MatchConfig` is cheap to clone and serde-friendly so it can be embedded in
/// higher-level configs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchConfig {
    /// Characters per hashed window.
    #[serde(default = "MatchConfig::default_window_size")]
    pub window_size: usize,
    /// Minimum similarity ratio, inclusive, that counts as plagiarism.
    ///
    /// Must lie in `0.0..=1.0`. [`validate`](Self::validate) rejects anything
    /// else, NaN included, so a threshold such as `1.5` is a config error
    /// instead of a setting that never flags.
    #[serde(default = "MatchConfig::default_threshold")]
    pub threshold: f64,
    /// Hash windows on the rayon pool.
    #[serde(default)]
    pub use_parallel: bool,
}

impl MatchConfig {
    pub(crate) fn default_window_size() -> usize {
        DEFAULT_WINDOW_SIZE
    }

    pub(crate) fn default_threshold() -> f64 {
        0.8
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.window_size < 1 {
            return Err(MatchError::InvalidConfig(format!(
                "window_size must be >= 1 (got {})",
                self.window_size
            )));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(MatchError::InvalidConfig(format!(
                "threshold must be between 0.0 and 1.0 (got {})",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Window hashing settings derived from this config.
    pub fn window_config(&self) -> WindowConfig {
        WindowConfig::new()
            .with_window_size(self.window_size)
            .with_parallel(self.use_parallel)
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            window_size: Self::default_window_size(),
            threshold: Self::default_threshold(),
            use_parallel: false,
        }
    }
}

/// Outcome of comparing two canonical texts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ComparisonResult {
    /// `matching_windows / compared_windows`, or 0 when nothing was compared.
    pub similarity_ratio: f64,
    /// `similarity_ratio >= threshold`.
    pub is_plagiarized: bool,
    /// Positions whose window hashes are equal.
    pub matching_windows: usize,
    /// Positions compared: the smaller of the two window counts.
    pub compared_windows: usize,
}

impl ComparisonResult {
    /// Build a result from raw counts.
    ///
    /// Zero compared windows scores 0 without dividing.
    pub fn from_counts(matching_windows: usize, compared_windows: usize, threshold: f64) -> Self {
        let similarity_ratio = if compared_windows == 0 {
            0.0
        } else {
            matching_windows as f64 / compared_windows as f64
        };
        Self {
            similarity_ratio,
            is_plagiarized: similarity_ratio >= threshold,
            matching_windows,
            compared_windows,
        }
    }

    /// Similarity as a percentage in `[0, 100]`.
    pub fn percentage(&self) -> f64 {
        self.similarity_ratio * 100.0
    }

    /// True when at least one text was shorter than a window.
    pub fn is_degenerate(&self) -> bool {
        self.compared_windows == 0
    }
}

/// Errors produced by the matching layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    /// Invalid window size or threshold.
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    /// Fingerprints built with different window sizes cannot be aligned.
    #[error("window size mismatch: left={left} right={right}")]
    WindowSizeMismatch { left: usize, right: usize },
    /// Window hashing failed.
    #[error("fingerprint error: {0}")]
    Fingerprint(#[from] FingerprintError),
}
