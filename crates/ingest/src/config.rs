//! Configuration for the ingest stage.
//!
//! ```rust
//! use ingest::IngestConfig;
//!
//! let config = IngestConfig::default();
//! assert_eq!(config.max_payload_bytes, Some(4 * 1024 * 1024));
//! config.validate().expect("valid configuration");
//! ```
use serde::{Deserialize, Serialize};

use crate::error::IngestError;

/// Default cap on raw document size: 4 MiB.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 4 * 1024 * 1024;

/// Runtime configuration for ingest behavior.
///
/// ```json
/// {
///   "version": 1,
///   "max_payload_bytes": 4194304
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Version of the ingest configuration.
    ///
    /// Default: `1`
    pub version: u32,

    /// Maximum raw payload byte length allowed.
    ///
    /// Documents larger than this are rejected with
    /// [`IngestError::PayloadTooLarge`] before any extraction work. Files on
    /// disk are checked against their metadata length before being read.
    /// `None` disables the check.
    ///
    /// Default: `Some(4 MiB)`
    #[serde(default = "IngestConfig::default_max_payload_bytes")]
    pub max_payload_bytes: Option<usize>,
}

impl IngestConfig {
    fn default_max_payload_bytes() -> Option<usize> {
        Some(DEFAULT_MAX_PAYLOAD_BYTES)
    }

    /// Validate the configuration. Call once at startup.
    pub fn validate(&self) -> Result<(), IngestError> {
        if self.version == 0 {
            return Err(IngestError::InvalidConfig(
                "version must be >= 1".into(),
            ));
        }
        if self.max_payload_bytes == Some(0) {
            return Err(IngestError::InvalidConfig(
                "max_payload_bytes must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Reject `len` when it exceeds the configured cap.
    pub(crate) fn check_size(&self, len: u64) -> Result<(), IngestError> {
        if let Some(limit) = self.max_payload_bytes {
            if len > limit as u64 {
                return Err(IngestError::PayloadTooLarge(format!(
                    "raw payload size {len} exceeds limit of {limit}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            version: 1,
            max_payload_bytes: Self::default_max_payload_bytes(),
        }
    }
}
