//! Manually supplied solar event times.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use chrono_tz::Tz;
use tatwa_time::localize;

use crate::error::EnvironmentError;

/// Wall-clock formats accepted for text input, tried in order.
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d-%m-%Y %H:%M:%S",
];

/// A solar event time as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTime {
    /// Wall-clock time in the environment zone.
    Local(NaiveDateTime),
    /// Instant with an explicit UTC offset.
    Offset(DateTime<FixedOffset>),
    /// Instant in UTC.
    Utc(DateTime<Utc>),
    /// Unparsed text: RFC 3339, or a wall-clock time in the environment zone.
    Text(String),
}

impl EventTime {
    /// Resolve to an instant in `tz`.
    pub fn localize(self, tz: Tz) -> Result<DateTime<Tz>, EnvironmentError> {
        match self {
            Self::Local(naive) => localize(tz, naive)
                .map_err(|e| EnvironmentError::InvalidEventTime(e.to_string())),
            Self::Offset(dt) => Ok(dt.with_timezone(&tz)),
            Self::Utc(dt) => Ok(dt.with_timezone(&tz)),
            Self::Text(text) => parse_text(&text)?.localize(tz),
        }
    }
}

fn parse_text(text: &str) -> Result<EventTime, EnvironmentError> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(EventTime::Offset(dt));
    }
    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(EventTime::Local)
        .ok_or_else(|| EnvironmentError::InvalidEventTime(format!("cannot parse {text:?}")))
}

impl From<NaiveDateTime> for EventTime {
    fn from(v: NaiveDateTime) -> Self {
        Self::Local(v)
    }
}

impl From<DateTime<FixedOffset>> for EventTime {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Self::Offset(v)
    }
}

impl From<DateTime<Utc>> for EventTime {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Utc(v)
    }
}

impl From<DateTime<Tz>> for EventTime {
    fn from(v: DateTime<Tz>) -> Self {
        Self::Utc(v.with_timezone(&Utc))
    }
}

impl From<&str> for EventTime {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for EventTime {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}
