//! Output types of the normalization pipeline.
//!
//! [`CanonicalText`] is the token stream the comparator works on.
//! [`CanonicalDocument`] wraps it with a document id, the identity hash and a
//! snapshot of the configuration that produced it.
//!
//! ```rust
//! use canonical::Normalizer;
//!
//! let normalizer = Normalizer::english();
//! let doc = normalizer.canonicalize("essay-1", "The quick, quick fox runs.").unwrap();
//!
//! assert_eq!(doc.canonical.as_str(), "quick quick fox run");
//! assert_eq!(doc.token_count, 4);
//! assert_eq!(doc.sha256_hex.len(), 64);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::NormalizeConfig;

/// Normalized tokens joined by single ASCII spaces.
///
/// Only the [`Normalizer`](crate::Normalizer) produces values of this type, so
/// holders can rely on: no leading, trailing or doubled spaces, and token
/// order identical to the source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalText(String);

impl CanonicalText {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in characters, the unit window offsets are counted in.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// Iterate the canonical tokens in order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|t| !t.is_empty())
    }
}

impl AsRef<str> for CanonicalText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CanonicalText> for String {
    fn from(value: CanonicalText) -> Self {
        value.0
    }
}

/// A canonicalized document.
///
/// ```text
/// CanonicalDocument
/// ├── doc_id: String             # caller's identifier (file name, upload id)
/// ├── canonical: CanonicalText   # normalized token stream
/// ├── token_count: usize         # tokens in `canonical`
/// ├── sha256_hex: String         # SHA-256(version || 0x00 || canonical)
/// ├── canonical_version: u32     # config version used
/// └── config: NormalizeConfig    # config snapshot
/// ```
///
/// An empty `canonical` is valid: it is the degenerate input the comparator
/// scores as zero similarity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalDocument {
    pub doc_id: String,
    pub canonical: CanonicalText,
    pub token_count: usize,
    /// Identity hash; equal for documents whose canonical text and
    /// normalizer version are equal.
    pub sha256_hex: String,
    pub canonical_version: u32,
    pub config: NormalizeConfig,
}
