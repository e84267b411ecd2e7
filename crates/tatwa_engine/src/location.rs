//! Geographic location and timezone lookup results.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};

use crate::error::EnvironmentError;

/// Valid latitude range in degrees.
pub const LATITUDE_RANGE_DEG: (f64, f64) = (-90.0, 90.0);

/// Valid longitude range in degrees.
pub const LONGITUDE_RANGE_DEG: (f64, f64) = (-180.0, 180.0);

/// Point on Earth's surface, validated on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude_deg: f64,
    longitude_deg: f64,
}

impl Coordinates {
    /// Validate latitude in [-90, 90] and longitude in [-180, 180].
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Result<Self, EnvironmentError> {
        check_range("latitude", latitude_deg, LATITUDE_RANGE_DEG)?;
        check_range("longitude", longitude_deg, LONGITUDE_RANGE_DEG)?;
        Ok(Self {
            // -0.0 -> 0.0
            latitude_deg: latitude_deg + 0.0,
            longitude_deg: longitude_deg + 0.0,
        })
    }

    /// Geodetic latitude in degrees, north positive.
    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    /// Longitude in degrees, east positive.
    pub fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }
}

fn check_range(axis: &str, value: f64, (min, max): (f64, f64)) -> Result<(), EnvironmentError> {
    if !value.is_finite() {
        return Err(EnvironmentError::InvalidCoordinate(format!(
            "{axis} {value} is not a number"
        )));
    }
    if !(min..=max).contains(&value) {
        return Err(EnvironmentError::InvalidCoordinate(format!(
            "{axis} {value} outside [{min}, {max}]"
        )));
    }
    Ok(())
}

impl FromStr for Coordinates {
    type Err = EnvironmentError;

    /// Parse `"lat, lon"` (comma optional around whitespace).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        let [lat, lon] = parts.as_slice() else {
            return Err(EnvironmentError::InvalidCoordinate(format!(
                "expected \"latitude, longitude\", got {s:?}"
            )));
        };
        let parse = |axis: &str, v: &str| {
            v.parse::<f64>().map_err(|_| {
                EnvironmentError::InvalidCoordinate(format!("{axis} {v:?} is not a number"))
            })
        };
        Self::new(parse("latitude", *lat)?, parse("longitude", *lon)?)
    }
}

impl Display for Coordinates {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude_deg, self.longitude_deg)
    }
}

/// Result of a timezone lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimezoneInfo {
    /// IANA zone identifier, e.g. `Europe/Madrid`.
    pub zone_id: String,
    /// Local wall-clock time at the location for the looked-up instant.
    pub local_instant: DateTime<FixedOffset>,
}
