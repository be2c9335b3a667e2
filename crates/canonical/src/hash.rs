//! Identity hashing for canonical documents.
//!
//! ```text
//! SHA-256(version.to_be_bytes() || 0x00 || canonical_text_bytes)
//! ```
//!
//! The normalizer version is part of the digest, so two canonical texts that
//! happen to be byte-equal but were produced by different normalizer versions
//! never share an identity.

use sha2::{Digest, Sha256};

/// Compute the version-aware identity hash of canonical text.
///
/// Returns 64 lowercase hex characters.
///
/// ```rust
/// use canonical::hash_canonical_bytes;
///
/// let v1 = hash_canonical_bytes(1, b"quick fox");
/// let v2 = hash_canonical_bytes(2, b"quick fox");
/// assert_eq!(v1.len(), 64);
/// assert_ne!(v1, v2);
/// ```
pub fn hash_canonical_bytes(canonical_version: u32, canonical_bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_version.to_be_bytes());
    hasher.update([0]);
    hasher.update(canonical_bytes);
    hex::encode(hasher.finalize())
}
