//! Error types for time sources.

use thiserror::Error;

/// Errors from obtaining or localizing the current time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Socket or clock I/O failed.
    #[error("I/O error: {0}")]
    Io(String),
    /// No reply from the time server in time.
    #[error("time server did not answer within {0} ms")]
    Timeout(u64),
    /// Time server reply could not be decoded.
    #[error("invalid time server reply: {0}")]
    InvalidPacket(String),
    /// Instant cannot be represented.
    #[error("time out of range: {0}")]
    OutOfRange(String),
    /// Wall-clock value does not exist in the zone (DST gap).
    #[error("nonexistent local time {0} in zone {1}")]
    NonexistentLocalTime(String, String),
    /// Remote time API failure.
    #[error("time API error: {0}")]
    Api(String),
}

impl From<std::io::Error> for TimeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
