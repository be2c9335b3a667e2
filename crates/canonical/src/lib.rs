//! Plagscan text normalization layer.
//!
//! Turns extracted document text into the canonical token stream the window
//! comparator hashes. Two documents that differ only in case, punctuation,
//! function words or inflection normalize to the same text.
//!
//! ## What we do
//!
//! - Optional Unicode NFKC (off by default)
//! - Unicode lowercasing
//! - Punctuation stripping: everything except word characters and whitespace
//! - Whitespace tokenization
//! - Stop-word removal (NLTK English list by default)
//! - Porter stemming (NLTK extension mode)
//! - Single-space join
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. The same text and config
//! give the same canonical text on any machine.
//!
//! ## Invariants worth knowing
//!
//! - Output never has leading, trailing or repeated spaces
//! - Output tokens appear in source order
//! - Empty output is valid and not an error
//! - Identity hash = SHA-256(version || 0x00 || canonical_text)
//!
//! ```rust
//! use canonical::Normalizer;
//!
//! let normalizer = Normalizer::english();
//! assert_eq!(
//!     normalizer.normalize("The quick, quick fox runs.").as_str(),
//!     "quick quick fox run"
//! );
//! ```

mod config;
mod document;
mod error;
mod hash;
mod pipeline;
mod stem;
mod stopwords;

pub use crate::config::NormalizeConfig;
pub use crate::document::{CanonicalDocument, CanonicalText};
pub use crate::error::CanonicalError;
pub use crate::hash::hash_canonical_bytes;
pub use crate::pipeline::{english_normalizer, normalize, Normalizer};
pub use crate::stem::stem;
pub use crate::stopwords::StopWords;
