use thiserror::Error;

pub type Result<T> = core::result::Result<T, ConfigError>;

/// Rejected list configuration.
///
/// Runtime data problems (zero heights, stale indexes, out-of-range scroll offsets) are clamped
/// or ignored instead; only construction and reconfiguration can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("container height must be positive, got {0}")]
    NonPositiveContainerHeight(i64),
    #[error("estimated item height must be positive, got {0}")]
    NonPositiveEstimatedItemHeight(i64),
    #[error("buffer count must be non-negative, got {0}")]
    NegativeBufferCount(i64),
    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },
    #[error("height snapshot has {actual} entries, expected {expected}")]
    SnapshotLengthMismatch { expected: usize, actual: usize },
}
