use fingerprint::{fingerprint_text, WindowConfig, WindowFingerprint, WindowHash};
use tracing::debug;

use crate::types::{ComparisonResult, MatchConfig, MatchError};


/// Pairwise comparator over canonical texts.
///
/// Holds a validated [`MatchConfig`]; cheap to clone and safe to share across
/// threads.
#[derive(Debug, Clone)]
pub struct Matcher {
    cfg: MatchConfig,
    window_cfg: WindowConfig,
}

impl Matcher {
    /// Validate `cfg` once and build a matcher from it.
    pub fn new(cfg: MatchConfig) -> Result<Self, MatchError> {
        cfg.validate()?;
        let window_cfg = cfg.window_config();
        window_cfg.validate()?;
        Ok(Self { cfg, window_cfg })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Fingerprint one canonical text with this matcher's window settings.
    pub fn fingerprint(&self, canonical: &str) -> Result<WindowFingerprint, MatchError> {
        Ok(fingerprint_text(canonical, &self.window_cfg)?)
    }

    /// Compare two canonical texts window by window.
    pub fn compare(&self, a: &str, b: &str) -> Result<ComparisonResult, MatchError> {
        let fa = self.fingerprint(a)?;
        let fb = self.fingerprint(b)?;
        self.compare_fingerprints(&fa, &fb)
    }

    /// Compare two precomputed fingerprints.
    ///
    /// Both must use the same window size; otherwise positions do not line up
    /// and the call fails with [`MatchError::WindowSizeMismatch`].
    pub fn compare_fingerprints(
        &self,
        a: &WindowFingerprint,
        b: &WindowFingerprint,
    ) -> Result<ComparisonResult, MatchError> {
        if a.meta.window_size != b.meta.window_size {
            return Err(MatchError::WindowSizeMismatch {
                left: a.meta.window_size,
                right: b.meta.window_size,
            });
        }

        let (matching, compared) = count_aligned_matches(&a.hashes, &b.hashes);
        let result = ComparisonResult::from_counts(matching, compared, self.cfg.threshold);

        debug!(
            target: "matcher",
            window_size = a.meta.window_size,
            left_windows = a.hashes.len(),
            right_windows = b.hashes.len(),
            matching_windows = result.matching_windows,
            compared_windows = result.compared_windows,
            similarity_ratio = result.similarity_ratio,
            is_plagiarized = result.is_plagiarized,
            "compare"
        );

        Ok(result)
    }
}

/// Count positions `i < min(a.len(), b.len())` where `a[i] == b[i]`.
///
/// Returns `(matches, compared)`.
pub fn count_aligned_matches(a: &[WindowHash], b: &[WindowHash]) -> (usize, usize) {
    let compared = a.len().min(b.len());
    let matches = a.iter().zip(b.iter()).filter(|(x, y)| x == y).count();
    (matches, compared)
}

/// One-shot comparison of two canonical texts.
///
/// Validates `cfg` on every call; build a [`Matcher`] once when comparing
/// many pairs.
pub fn compare(a: &str, b: &str, cfg: &MatchConfig) -> Result<ComparisonResult, MatchError> {
    Matcher::new(cfg.clone())?.compare(a, b)
}
