//! Wiring of the HTTP clients into the environment's [`Providers`].
//!
//! | Need            | First choice       | Fallback             |
//! |-----------------|--------------------|----------------------|
//! | geocode         | Google             | none                 |
//! | reverse geocode | Google             | TimeZoneDB zone name |
//! | timezone        | TimeZoneDB         | Google               |
//! | solar events    | sunrise-sunset.org | none (no key needed) |

use std::rc::Rc;

use chrono::{DateTime, Utc};
use tatwa_config::{TatwaConfig, TimeMode};
use tatwa_engine::{
    Coordinates, Geocoder, LookupError, Providers, TimezoneInfo, TimezoneResolver,
};
use tatwa_time::{SntpClock, SystemClock, TimeSource};
use tracing::info;

use crate::google::GoogleMapsClient;
use crate::sunrise_sunset::SunriseSunsetClient;
use crate::timezonedb::TimeZoneDbClient;

/// Keyed location services, whichever are configured.
#[derive(Debug, Clone, Default)]
pub struct LocationServices {
    google: Option<Rc<GoogleMapsClient>>,
    timezonedb: Option<TimeZoneDbClient>,
}

impl LocationServices {
    pub fn new(google: Option<GoogleMapsClient>, timezonedb: Option<TimeZoneDbClient>) -> Self {
        Self {
            google: google.map(Rc::new),
            timezonedb,
        }
    }

    pub fn has_google(&self) -> bool {
        self.google.is_some()
    }

    pub fn has_timezonedb(&self) -> bool {
        self.timezonedb.is_some()
    }
}

impl Geocoder for LocationServices {
    fn geocode(&self, address: &str) -> Result<Coordinates, LookupError> {
        match &self.google {
            Some(google) => google.geocode(address),
            None => Err(LookupError::Unavailable(
                "geocoding needs a Google API key".into(),
            )),
        }
    }

    fn reverse_geocode(&self, location: Coordinates) -> Result<String, LookupError> {
        match (&self.google, &self.timezonedb) {
            (Some(google), _) => google.reverse_geocode(location),
            (None, Some(tzdb)) => tzdb.place_name(location),
            (None, None) => Err(LookupError::Unavailable(
                "reverse geocoding needs a Google or TimeZoneDB API key".into(),
            )),
        }
    }
}

impl TimezoneResolver for LocationServices {
    fn resolve_timezone(
        &self,
        location: Coordinates,
        instant: Option<DateTime<Utc>>,
    ) -> Result<TimezoneInfo, LookupError> {
        match (&self.timezonedb, &self.google) {
            (Some(tzdb), _) => tzdb.resolve_timezone(location, instant),
            (None, Some(google)) => google.resolve_timezone(location, instant),
            (None, None) => Err(LookupError::Unavailable(
                "timezone lookup needs a TimeZoneDB or Google API key".into(),
            )),
        }
    }
}

/// The clock selected by `config.time.mode`.
pub fn clock_from_config(config: &TatwaConfig) -> Result<Box<dyn TimeSource>, LookupError> {
    match config.time.mode {
        TimeMode::Ntp => Ok(Box::new(SntpClock::new(
            config.time.ntp_server.clone(),
            config.time.timeout(),
        ))),
        TimeMode::Api => TimeZoneDbClient::from_config(&config.api)
            .map(|c| Box::new(c) as Box<dyn TimeSource>)
            .ok_or_else(|| {
                LookupError::Unavailable("time mode api needs a TimeZoneDB API key".into())
            }),
        TimeMode::Local => Ok(Box::new(SystemClock)),
    }
}

/// Production collaborators for `config`.
pub fn providers_from_config(config: &TatwaConfig) -> Result<Providers, LookupError> {
    let google = GoogleMapsClient::from_config(&config.api)
        .map(|g| clock_from_config(config).map(|clock| g.with_clock(clock)))
        .transpose()?;
    let services = LocationServices::new(google, TimeZoneDbClient::from_config(&config.api));
    info!(
        google = services.has_google(),
        timezonedb = services.has_timezonedb(),
        time_mode = %config.time.mode,
        "providers configured"
    );

    Ok(Providers {
        geocoder: Box::new(services.clone()),
        timezones: Box::new(services),
        solar: Box::new(SunriseSunsetClient::from_config(&config.api)),
        clock: clock_from_config(config)?,
    })
}
