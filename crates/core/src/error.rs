//! Error types for strata collections.

use thiserror::Error;

/// Primary error type for collection and statistic operations.
///
/// Every variant signals a caller contract violation. Empty aggregates are
/// never errors: they surface as NaN or `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("index {index} out of range for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("range {start}..{end} out of range for length {len}")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },

    #[error("unsupported mutation: {0}")]
    UnsupportedMutation(&'static str),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
}

/// Convenience Result type alias for StatsError.
pub type Result<T> = std::result::Result<T, StatsError>;
