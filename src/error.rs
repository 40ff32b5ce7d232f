//! Error types for the persistent van Emde Boas tree.

/// Failure modes for [`crate::PVeb`] construction and queries.
///
/// `KeyOutOfBounds` and `InvalidBounds`/`InvalidCoefficient` are caller bugs
/// (precondition violations, per the design's error model); `NotFound` is a
/// recoverable, expected outcome of looking up an absent key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PVebError {
    /// A key fell outside the tree's configured `[lb, ub]` interval.
    #[error("key {key} is outside the tree bounds [{lb}, {ub}]")]
    KeyOutOfBounds { key: u64, lb: u64, ub: u64 },

    /// `get` was called for a key that is not present in the tree.
    #[error("key {0} not found")]
    NotFound(u64),

    /// `lb > ub` at construction time.
    #[error("invalid bounds: lb ({lb}) must be <= ub ({ub})")]
    InvalidBounds { lb: u64, ub: u64 },

    /// `c < 1` at construction time.
    #[error("invalid coefficient: c must be >= 1, got {0}")]
    InvalidCoefficient(i64),
}
