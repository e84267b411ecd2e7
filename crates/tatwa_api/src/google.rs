//! Google Maps geocoding and timezone client.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;
use tatwa_config::ApiConfig;
use tatwa_engine::{Coordinates, Geocoder, LookupError, TimezoneInfo, TimezoneResolver};
use tatwa_time::{SystemClock, TimeSource};
use tracing::debug;

use crate::http::{HttpClient, decode};

const SERVICE: &str = "google-maps";
const LANGUAGE: &str = "es";

#[derive(Debug, Deserialize)]
struct GeocodeReply {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimezoneReply {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    dst_offset: i64,
    #[serde(default)]
    raw_offset: i64,
    #[serde(default)]
    time_zone_id: String,
}

fn status_error(status: String, message: Option<String>, query: &str) -> LookupError {
    match status.as_str() {
        "ZERO_RESULTS" => LookupError::NotFound(query.to_string()),
        _ => LookupError::Api {
            service: SERVICE,
            message: match message {
                Some(m) => format!("{status}: {m}"),
                None => status,
            },
        },
    }
}

fn first_result(body: &str, query: &str) -> Result<GeocodeResult, LookupError> {
    let reply: GeocodeReply = decode(SERVICE, body)?;
    if reply.status != "OK" {
        return Err(status_error(reply.status, reply.error_message, query));
    }
    reply
        .results
        .into_iter()
        .next()
        .ok_or_else(|| LookupError::NotFound(query.to_string()))
}

/// Decode a forward-geocoding reply into the first result's coordinates.
pub fn decode_geocode(body: &str, address: &str) -> Result<Coordinates, LookupError> {
    let location = first_result(body, address)?.geometry.location;
    Coordinates::new(location.lat, location.lng)
        .map_err(|e| LookupError::Decode(format!("{SERVICE}: {e}")))
}

/// Decode a reverse-geocoding reply into the first formatted address.
pub fn decode_reverse_geocode(body: &str, latlng: &str) -> Result<String, LookupError> {
    Ok(first_result(body, latlng)?.formatted_address)
}

/// Decode a timezone reply for the request made at `instant`.
pub fn decode_timezone(body: &str, instant: DateTime<Utc>) -> Result<TimezoneInfo, LookupError> {
    let reply: TimezoneReply = decode(SERVICE, body)?;
    if reply.status != "OK" {
        return Err(status_error(reply.status, reply.error_message, "timezone"));
    }
    if reply.time_zone_id.is_empty() {
        return Err(LookupError::Decode(format!("{SERVICE}: missing timeZoneId")));
    }
    let total = reply.dst_offset + reply.raw_offset;
    let offset = i32::try_from(total)
        .ok()
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| LookupError::Decode(format!("{SERVICE}: offset {total}")))?;
    Ok(TimezoneInfo {
        zone_id: reply.time_zone_id,
        local_instant: instant.with_timezone(&offset),
    })
}

/// Google Maps client. Needs an API key.
pub struct GoogleMapsClient {
    http: HttpClient,
    geocode_url: String,
    timezone_url: String,
    key: String,
    /// The timezone API needs a timestamp; used when the caller gives none.
    clock: Box<dyn TimeSource>,
}

impl std::fmt::Debug for GoogleMapsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleMapsClient")
            .field("geocode_url", &self.geocode_url)
            .field("timezone_url", &self.timezone_url)
            .finish_non_exhaustive()
    }
}

impl GoogleMapsClient {
    pub fn new(
        geocode_url: impl Into<String>,
        timezone_url: impl Into<String>,
        key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http: HttpClient::new(timeout),
            geocode_url: geocode_url.into(),
            timezone_url: timezone_url.into(),
            key: key.into(),
            clock: Box::new(SystemClock),
        }
    }

    /// `None` when no Google key is configured.
    pub fn from_config(config: &ApiConfig) -> Option<Self> {
        config.google_api_key.as_ref().map(|key| {
            Self::new(
                config.google_geocode_url.clone(),
                config.google_timezone_url.clone(),
                key.clone(),
                config.http_timeout(),
            )
        })
    }

    /// Use `clock` for timezone requests without an explicit instant.
    pub fn with_clock(mut self, clock: Box<dyn TimeSource>) -> Self {
        self.clock = clock;
        self
    }

    fn geocode_query(&self, name: &'static str, value: String) -> Result<String, LookupError> {
        let query = [
            (name, value),
            ("key", self.key.clone()),
            ("language", LANGUAGE.to_string()),
        ];
        self.http.get_text(SERVICE, &self.geocode_url, &query)
    }
}

impl Geocoder for GoogleMapsClient {
    fn geocode(&self, address: &str) -> Result<Coordinates, LookupError> {
        let body = self.geocode_query("address", address.to_string())?;
        let found = decode_geocode(&body, address)?;
        debug!(address, %found, "geocoded");
        Ok(found)
    }

    fn reverse_geocode(&self, location: Coordinates) -> Result<String, LookupError> {
        let latlng = format!("{},{}", location.latitude_deg(), location.longitude_deg());
        let body = self.geocode_query("latlng", latlng.clone())?;
        decode_reverse_geocode(&body, &latlng)
    }
}

impl TimezoneResolver for GoogleMapsClient {
    fn resolve_timezone(
        &self,
        location: Coordinates,
        instant: Option<DateTime<Utc>>,
    ) -> Result<TimezoneInfo, LookupError> {
        let instant = match instant {
            Some(t) => t,
            None => self
                .clock
                .now()
                .map_err(|e| LookupError::Unavailable(format!("current time: {e}")))?,
        };
        let query = [
            (
                "location",
                format!("{},{}", location.latitude_deg(), location.longitude_deg()),
            ),
            ("timestamp", instant.timestamp().to_string()),
            ("key", self.key.clone()),
            ("language", LANGUAGE.to_string()),
        ];
        let body = self.http.get_text(SERVICE, &self.timezone_url, &query)?;
        decode_timezone(&body, instant)
    }
}
