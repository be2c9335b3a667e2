//! Configuration types for the normalization pipeline.
//!
//! This module defines [`NormalizeConfig`], which selects the steps the
//! [`Normalizer`](crate::Normalizer) runs. Every step defaults to on except
//! the optional NFKC pass, so the default configuration is the full
//! plagiarism-scan pipeline:
//!
//! ```text
//! lowercase → strip [^\w\s] → split on whitespace → drop stop words → stem → join with ' '
//! ```
//!
//! # Versioning
//!
//! The `version` field is folded into every canonical identity hash. Any change
//! to normalization output (including bug fixes in the stemmer) must come with
//! a version bump so old and new canonical documents are never confused.
//!
//! # Examples
//!
//! ```rust
//! use canonical::NormalizeConfig;
//!
//! let config = NormalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(!config.normalize_unicode);
//! assert!(config.lowercase);
//! assert!(config.strip_punctuation);
//! assert!(config.remove_stop_words);
//! assert!(config.stem);
//! ```
//!
//! Keeping inflections, for example to debug why two documents diverge:
//!
//! ```rust
//! use canonical::NormalizeConfig;
//!
//! let config = NormalizeConfig {
//!     stem: false,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for the normalization pipeline.
///
/// Cheap to clone and serde-friendly so it can be embedded in higher-level
/// configuration files.
///
/// ```json
/// {
///   "version": 1,
///   "normalize_unicode": false,
///   "lowercase": true,
///   "strip_punctuation": true,
///   "remove_stop_words": true,
///   "stem": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizeConfig {
    /// Version of the normalization behaviour.
    ///
    /// Must be >= 1. Version 0 is reserved and rejected with
    /// [`CanonicalError::InvalidConfig`].
    pub version: u32,

    /// Apply Unicode NFKC normalization before any other step.
    ///
    /// Off by default. Turning it on merges compatibility forms (ligatures,
    /// full-width letters, composed vs. decomposed accents) so that documents
    /// extracted by different tools compare equal, at the cost of departing
    /// from a plain lowercase/strip pipeline.
    #[serde(default)]
    pub normalize_unicode: bool,

    /// Unicode-aware lowercasing of the whole text.
    pub lowercase: bool,

    /// Remove every character that is neither a word character (Unicode
    /// alphanumeric or `_`) nor whitespace.
    ///
    /// Removal does not split words: `"don't"` becomes `"dont"`.
    pub strip_punctuation: bool,

    /// Drop tokens found in the normalizer's stop-word table.
    pub remove_stop_words: bool,

    /// Reduce every surviving token to its Porter stem.
    pub stem: bool,
}

impl NormalizeConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: false,
            lowercase: true,
            strip_punctuation: true,
            remove_stop_words: true,
            stem: true,
        }
    }
}
