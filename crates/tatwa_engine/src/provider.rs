//! Collaborator interfaces consumed by the environment.
//!
//! Implementations are blocking request/response; retries, caching and
//! timeouts belong to the implementation, not to the environment.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use tatwa_base::SolarEvent;
use tatwa_time::TimeSource;

use crate::error::LookupError;
use crate::location::{Coordinates, TimezoneInfo};

/// Address <-> coordinates lookup.
pub trait Geocoder {
    fn geocode(&self, address: &str) -> Result<Coordinates, LookupError>;

    fn reverse_geocode(&self, location: Coordinates) -> Result<String, LookupError>;
}

/// Coordinates -> IANA zone.
pub trait TimezoneResolver {
    /// `instant` selects the moment for offset/DST data; `None` means now.
    fn resolve_timezone(
        &self,
        location: Coordinates,
        instant: Option<DateTime<Utc>>,
    ) -> Result<TimezoneInfo, LookupError>;
}

/// Solar events for one calendar date at one location.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolarDay {
    /// Event instants in UTC. Events that do not occur (polar day/night)
    /// are absent.
    pub events: BTreeMap<SolarEvent, DateTime<Utc>>,
    /// Time between sunrise and sunset, when reported.
    pub day_length: Option<TimeDelta>,
}

/// Coordinates + date -> solar event instants.
pub trait SolarEventSource {
    /// `date = None` lets the service pick its current date.
    fn fetch_solar_events(
        &self,
        location: Coordinates,
        date: Option<NaiveDate>,
    ) -> Result<SolarDay, LookupError>;
}

/// The collaborators one environment uses.
pub struct Providers {
    pub geocoder: Box<dyn Geocoder>,
    pub timezones: Box<dyn TimezoneResolver>,
    pub solar: Box<dyn SolarEventSource>,
    pub clock: Box<dyn TimeSource>,
}

impl std::fmt::Debug for Providers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Providers").finish_non_exhaustive()
    }
}
