//! Configuration and error types for window fingerprinting.
//!
//! Free of I/O and environment lookups, so a fingerprint is a pure function
//! of `(canonical_text, config)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Window size used when none is configured.
pub const DEFAULT_WINDOW_SIZE: usize = 20;

/// Configuration for the window fingerprinting pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WindowConfig {
    /// Configuration schema version.
    ///
    /// Any change that can affect window hashes must bump this version so
    /// stored fingerprints are never compared across incompatible builds.
    pub version: u32,
    /// Number of characters per window.
    ///
    /// Smaller windows catch shorter copied passages but also match
    /// coincidental phrasing; larger windows are stricter.
    pub window_size: usize,
    /// Hash windows on the rayon pool.
    ///
    /// Output order and values are identical to the sequential path; only
    /// worth enabling for long documents.
    #[serde(default)]
    pub use_parallel: bool,
}

impl WindowConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window size in characters.
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Enable or disable parallel hashing.
    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), FingerprintError> {
        if self.version < 1 {
            return Err(FingerprintError::InvalidConfigVersion {
                version: self.version,
            });
        }
        if self.window_size < 1 {
            return Err(FingerprintError::InvalidWindowSize {
                window_size: self.window_size,
            });
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            version: 1,
            window_size: DEFAULT_WINDOW_SIZE,
            use_parallel: false,
        }
    }
}

/// Errors returned by the window fingerprinting pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FingerprintError {
    #[error("invalid config: window_size must be >= 1 (got {window_size})")]
    InvalidWindowSize { window_size: usize },

    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },
}
