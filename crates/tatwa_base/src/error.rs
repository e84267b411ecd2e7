//! Error types for the tatwa value and solar event identifiers.

use thiserror::Error;

/// Errors from building or comparing [`Tatwa`](crate::Tatwa) values and
/// from parsing [`SolarEvent`](crate::SolarEvent) names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TatwaError {
    /// Name is not one of the five canonical tatwas.
    #[error("invalid tatwa name: {0:?}")]
    InvalidName(String),
    /// Absolute position below 1.
    #[error("invalid tatwa position: {0} (must be >= 1)")]
    InvalidPosition(i64),
    /// Shifted position beyond the representable range.
    #[error("tatwa position out of range: {0}")]
    PositionOutOfRange(i128),
    /// Comparison operand that cannot be read as a tatwa.
    #[error("invalid tatwa operand: {0}")]
    InvalidArgument(String),
    /// Unknown solar event identifier.
    #[error("unknown solar event: {0:?}")]
    UnknownEvent(String),
}
