use thiserror::Error;

/// Errors that can occur while building a normalizer or canonicalizing a
/// document.
///
/// Normalizing text itself never fails: empty or stop-word-only input yields
/// an empty [`CanonicalText`](crate::CanonicalText).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("canonical document requires a non-empty doc_id")]
    MissingDocId,
}
