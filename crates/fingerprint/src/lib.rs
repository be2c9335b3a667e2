//! # Plagscan Window Fingerprinting
//!
//! Turns canonical text into the ordered sequence of window hashes the
//! matcher compares position by position.
//!
//! ## Contract
//!
//! - Consumes canonical text produced by the `canonical` crate. It never
//!   normalizes, tokenizes or reads ingest metadata.
//! - Pure function of `(canonical_text, config)`: no I/O, no clocks, no
//!   global state.
//!
//! Invariant: for the same text and [`WindowConfig`], the fingerprint is bit
//! identical, whether or not `use_parallel` is set.
//!
//! ## Algorithm
//!
//! For a text of `n` characters and window size `w`, window `i` covers
//! characters `i..i + w` for every `i` in `0..=n - w`. Each window's UTF-8
//! bytes are hashed with SHA-256. A text shorter than `w` has no windows.
//!
//! ```
//! use fingerprint::{fingerprint_text, WindowConfig};
//!
//! let cfg = WindowConfig::new().with_window_size(5);
//! let fp = fingerprint_text("quick quick fox run", &cfg).unwrap();
//!
//! assert_eq!(fp.hashes.len(), 15);
//! assert_eq!(fp.meta.window_size, 5);
//! assert_eq!(fp.meta.char_len, 19);
//! ```
pub mod config;
pub mod fingerprint;
mod windows;

pub use crate::config::{FingerprintError, WindowConfig, DEFAULT_WINDOW_SIZE};
pub use crate::fingerprint::{WindowFingerprint, WindowHash, WindowMeta};
pub use crate::windows::{window_count, window_hashes, window_hashes_parallel};

/// Current fingerprint algorithm version for this crate.
pub const FINGERPRINT_VERSION: u16 = 1;

/// Human-readable algorithm identifier.
pub const FINGERPRINT_ALGORITHM: &str = "sha256_char_window_v1";

/// Compute the window fingerprint of canonical text.
pub fn fingerprint_text(
    text: &str,
    cfg: &WindowConfig,
) -> Result<WindowFingerprint, FingerprintError> {
    cfg.validate()?;

    let hashes = if cfg.use_parallel {
        window_hashes_parallel(text, cfg.window_size)
    } else {
        window_hashes(text, cfg.window_size)
    };

    Ok(WindowFingerprint {
        hashes,
        meta: WindowMeta {
            fingerprint_version: FINGERPRINT_VERSION,
            algorithm_name: FINGERPRINT_ALGORITHM.to_string(),
            window_size: cfg.window_size,
            char_len: text.chars().count(),
            use_parallel: cfg.use_parallel,
            config_version: cfg.version,
        },
    })
}
