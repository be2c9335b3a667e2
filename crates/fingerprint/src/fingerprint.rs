//! Fingerprint and metadata types for the window hashing stage.
//!
//! The schema is part of the public contract: any incompatible change must
//! come with a new `fingerprint_version`.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// SHA-256 digest of one window of canonical text.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowHash([u8; 32]);

impl WindowHash {
    /// Hash the UTF-8 bytes of a window.
    pub fn of(window: &[u8]) -> Self {
        Self(Sha256::digest(window).into())
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex, 64 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for WindowHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for WindowHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WindowHash({})", self.to_hex())
    }
}

/// Ordered window hashes of one canonical text.
///
/// `hashes[i]` covers characters `i..i + meta.window_size`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WindowFingerprint {
    pub hashes: Vec<WindowHash>,
    pub meta: WindowMeta,
}

impl WindowFingerprint {
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// True when the text was shorter than one window.
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

/// Metadata for traceability and determinism.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WindowMeta {
    /// Algorithm version owned by this crate.
    pub fingerprint_version: u16,
    /// Human-readable algorithm identifier.
    pub algorithm_name: String,
    /// Characters per window.
    pub window_size: usize,
    /// Length of the source text in characters.
    pub char_len: usize,
    pub use_parallel: bool,
    /// Configuration schema version supplied when computing this fingerprint.
    pub config_version: u32,
}
