//! sunrise-sunset.org client.
//!
//! `GET {url}?lat=..&lng=..&date=YYYY-MM-DD&formatted=0` answers with ISO
//! 8601 UTC instants per event plus `day_length` in seconds. Events that do
//! not happen on that date (polar day or night) come back as the epoch
//! placeholder `1970-01-01T00:00:01+00:00` and are left out.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::Deserialize;
use tatwa_base::ALL_SOLAR_EVENTS;
use tatwa_config::ApiConfig;
use tatwa_engine::{Coordinates, LookupError, SolarDay, SolarEventSource};
use tracing::debug;

use crate::http::{HttpClient, decode};

const SERVICE: &str = "sunrise-sunset";

/// Instants at or before this are placeholders for "does not occur".
const PLACEHOLDER_CUTOFF_SECS: i64 = 1;

#[derive(Debug, Deserialize)]
struct Reply {
    status: String,
    /// An object on success; an empty string on error replies.
    #[serde(default)]
    results: serde_json::Value,
}

/// Decode a `formatted=0` reply body.
pub fn decode_solar_day(body: &str) -> Result<SolarDay, LookupError> {
    let reply: Reply = decode(SERVICE, body)?;
    if reply.status != "OK" {
        return Err(LookupError::Api {
            service: SERVICE,
            message: reply.status,
        });
    }

    let results = reply
        .results
        .as_object()
        .ok_or_else(|| LookupError::Decode(format!("{SERVICE}: results is not an object")))?;

    let mut events = BTreeMap::new();
    for event in ALL_SOLAR_EVENTS {
        let Some(value) = results.get(event.key()) else {
            continue;
        };
        let text = value.as_str().ok_or_else(|| {
            LookupError::Decode(format!("{SERVICE}: {} is not a string", event.key()))
        })?;
        let instant = DateTime::parse_from_rfc3339(text)
            .map_err(|e| LookupError::Decode(format!("{SERVICE}: {}: {e}", event.key())))?
            .with_timezone(&Utc);
        if instant.timestamp() <= PLACEHOLDER_CUTOFF_SECS {
            debug!(event = event.key(), "event does not occur");
            continue;
        }
        events.insert(event, instant);
    }

    let day_length = results
        .get("day_length")
        .and_then(serde_json::Value::as_i64)
        .map(TimeDelta::seconds);

    Ok(SolarDay { events, day_length })
}

/// Solar events from sunrise-sunset.org.
#[derive(Debug, Clone)]
pub struct SunriseSunsetClient {
    http: HttpClient,
    url: String,
}

impl SunriseSunsetClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: HttpClient::new(timeout),
            url: url.into(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.sunrise_sunset_url.clone(), config.http_timeout())
    }
}

impl SolarEventSource for SunriseSunsetClient {
    fn fetch_solar_events(
        &self,
        location: Coordinates,
        date: Option<NaiveDate>,
    ) -> Result<SolarDay, LookupError> {
        let date = date.map_or_else(|| "today".to_string(), |d| d.format("%Y-%m-%d").to_string());
        let query = [
            ("lat", location.latitude_deg().to_string()),
            ("lng", location.longitude_deg().to_string()),
            ("date", date),
            ("formatted", "0".to_string()),
        ];
        let body = self.http.get_text(SERVICE, &self.url, &query)?;
        decode_solar_day(&body)
    }
}
