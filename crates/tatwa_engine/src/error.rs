//! Error types for the tatwa environment and its collaborators.

use tatwa_base::SolarEvent;
use tatwa_time::TimeError;
use thiserror::Error;

/// Failure reported by a geocoding, timezone or solar-event collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LookupError {
    /// The service answered but had no result for the query.
    #[error("no result: {0}")]
    NotFound(String),
    /// Network or HTTP transport failure.
    #[error("transport error: {0}")]
    Transport(String),
    /// The service reported an error status.
    #[error("{service} error: {message}")]
    Api {
        service: &'static str,
        message: String,
    },
    /// The reply could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
    /// The collaborator is not configured (missing credentials).
    #[error("not configured: {0}")]
    Unavailable(String),
}

/// Errors from [`TatwaEnvironment`](crate::TatwaEnvironment) setters and
/// computations. A setter that returns an error leaves the state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EnvironmentError {
    /// Address is empty or whitespace.
    #[error("address must not be empty")]
    EmptyAddress,
    /// Latitude or longitude out of range or not a number.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
    /// Operation needs coordinates that are not set.
    #[error("location is not set")]
    MissingLocation,
    /// A manually supplied solar event time is unusable.
    #[error("invalid solar event time: {0}")]
    InvalidEventTime(String),
    /// No solar event instants to compute from.
    #[error("solar event times are not available")]
    MissingSolarData,
    /// The requested event is not in the solar-event map.
    #[error("solar event {0} is not available")]
    EventNotAvailable(SolarEvent),
    /// The query instant falls outside the cycle of every configured event.
    #[error("query time is outside the tatwa cycle of every solar event")]
    AllEventsIncoherent,
    /// Pinned query date/time does not exist in the environment zone.
    #[error("invalid query time: {0}")]
    InvalidQueryTime(String),
    /// Geocoding or timezone lookup failed.
    #[error("location resolution failed: {0}")]
    LocationResolution(LookupError),
    /// Solar event lookup failed.
    #[error("solar data lookup failed: {0}")]
    SolarData(LookupError),
    /// Current time could not be obtained.
    #[error("time source failed: {0}")]
    TimeSource(TimeError),
}

impl From<TimeError> for EnvironmentError {
    fn from(e: TimeError) -> Self {
        match e {
            TimeError::NonexistentLocalTime(..) => Self::InvalidQueryTime(e.to_string()),
            other => Self::TimeSource(other),
        }
    }
}
