//! # Plagscan Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` decides whether two canonical texts are similar enough to count
//! as plagiarism. It sits on top of the `fingerprint` crate, which turns each
//! text into ordered SHA-256 window hashes.
//!
//! ## Algorithm
//!
//! 1. Hash every window of `window_size` characters of both texts.
//! 2. Let `n` be the smaller window count. Count positions `i < n` whose
//!    hashes are equal. Windows are compared only at the same offset.
//! 3. `similarity_ratio = matches / n`, or 0 when `n == 0`.
//! 4. `is_plagiarized = similarity_ratio >= threshold`.
//!
//! Positional alignment means an insertion near the start of one text shifts
//! every later window and can drop the ratio sharply.
//!
//! ## Core Types
//!
//! - [`MatchConfig`]: window size (default 20) and threshold (default 0.8).
//! - [`ComparisonResult`]: ratio, verdict and the raw window counts.
//! - [`Matcher`]: a validated config, reusable across comparisons.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{Matcher, MatchConfig};
//!
//! let matcher = Matcher::new(MatchConfig::default()).expect("valid config");
//! let text = "plagiar detect compar document";
//!
//! let result = matcher.compare(text, text).expect("compare");
//! assert_eq!(result.similarity_ratio, 1.0);
//! assert!(result.is_plagiarized);
//!
//! let short = matcher.compare("quick fox", "quick fox").expect("compare");
//! assert_eq!(short.similarity_ratio, 0.0);
//! assert!(short.is_degenerate());
//! ```
//!
//! ## Observability
//!
//! Every comparison emits a `debug` event on the `matcher` target with the
//! window counts and the verdict.

pub mod engine;
pub mod types;

pub use crate::engine::{compare, count_aligned_matches, Matcher};
pub use crate::types::{ComparisonResult, MatchConfig, MatchError};
