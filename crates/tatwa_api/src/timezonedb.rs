//! TimeZoneDB `get-time-zone` client.
//!
//! Serves three roles: timezone resolution by position, a coarse reverse
//! geocoder (`"{city}, {country}({code})"` derived from the zone name) and,
//! queried for zone `UTC`, a remote clock.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;
use tatwa_config::ApiConfig;
use tatwa_engine::{Coordinates, LookupError, TimezoneInfo, TimezoneResolver};
use tatwa_time::{TimeError, TimeSource};
use tracing::debug;

use crate::http::{HttpClient, decode};

const SERVICE: &str = "timezonedb";
const FIELDS: &str = "timestamp,zoneName,countryCode,countryName,gmtOffset,dst";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Reply {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    country_code: String,
    #[serde(default)]
    country_name: String,
    #[serde(default)]
    zone_name: String,
    #[serde(default)]
    gmt_offset: i64,
    /// `"0"`/`"1"` in practice; numbers are accepted too.
    #[serde(default)]
    dst: serde_json::Value,
    /// Local wall-clock time as seconds since the epoch.
    #[serde(default)]
    timestamp: i64,
}

/// Decoded `get-time-zone` answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneReport {
    pub zone_id: String,
    pub country_name: String,
    pub country_code: String,
    pub dst: bool,
    /// Current instant with the zone's offset at that instant.
    pub local_instant: DateTime<FixedOffset>,
}

impl ZoneReport {
    /// Readable place name built from the zone's last segment.
    pub fn place_name(&self) -> String {
        let city = self
            .zone_id
            .rsplit('/')
            .next()
            .unwrap_or(&self.zone_id)
            .replace('_', " ");
        format!("{city}, {}({})", self.country_name, self.country_code)
    }
}

/// Decode a JSON reply body.
pub fn decode_zone_report(body: &str) -> Result<ZoneReport, LookupError> {
    let reply: Reply = decode(SERVICE, body)?;
    if reply.status != "OK" {
        return Err(LookupError::Api {
            service: SERVICE,
            message: if reply.message.is_empty() {
                reply.status
            } else {
                reply.message
            },
        });
    }

    let zone_id = reply.zone_name.replace('\\', "");
    if zone_id.is_empty() {
        return Err(LookupError::Decode(format!("{SERVICE}: missing zoneName")));
    }
    let offset = i32::try_from(reply.gmt_offset)
        .ok()
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| LookupError::Decode(format!("{SERVICE}: gmtOffset {}", reply.gmt_offset)))?;
    let utc = DateTime::from_timestamp(reply.timestamp - reply.gmt_offset, 0)
        .ok_or_else(|| LookupError::Decode(format!("{SERVICE}: timestamp {}", reply.timestamp)))?;
    let dst = match &reply.dst {
        serde_json::Value::String(s) => s == "1",
        serde_json::Value::Number(n) => n.as_i64() == Some(1),
        serde_json::Value::Bool(b) => *b,
        _ => false,
    };

    Ok(ZoneReport {
        zone_id,
        country_name: reply.country_name,
        country_code: reply.country_code,
        dst,
        local_instant: utc.with_timezone(&offset),
    })
}

/// TimeZoneDB client. Needs an API key.
#[derive(Debug, Clone)]
pub struct TimeZoneDbClient {
    http: HttpClient,
    url: String,
    key: String,
}

impl TimeZoneDbClient {
    pub fn new(url: impl Into<String>, key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: HttpClient::new(timeout),
            url: url.into(),
            key: key.into(),
        }
    }

    /// `None` when no TimeZoneDB key is configured.
    pub fn from_config(config: &ApiConfig) -> Option<Self> {
        config
            .timezonedb_api_key
            .as_ref()
            .map(|key| Self::new(config.timezonedb_url.clone(), key.clone(), config.http_timeout()))
    }

    fn get(&self, mut query: Vec<(&str, String)>) -> Result<ZoneReport, LookupError> {
        query.extend([
            ("format", "json".to_string()),
            ("key", self.key.clone()),
            ("fields", FIELDS.to_string()),
        ]);
        let body = self.http.get_text(SERVICE, &self.url, &query)?;
        decode_zone_report(&body)
    }

    /// Zone data at `location`, at `instant` or now.
    pub fn by_position(
        &self,
        location: Coordinates,
        instant: Option<DateTime<Utc>>,
    ) -> Result<ZoneReport, LookupError> {
        let mut query = vec![
            ("by", "position".to_string()),
            ("lat", location.latitude_deg().to_string()),
            ("lng", location.longitude_deg().to_string()),
        ];
        if let Some(t) = instant {
            query.push(("time", t.timestamp().to_string()));
        }
        self.get(query)
    }

    /// Zone data for an IANA zone name.
    pub fn by_zone(&self, zone: &str) -> Result<ZoneReport, LookupError> {
        self.get(vec![("by", "zone".to_string()), ("zone", zone.to_string())])
    }

    /// Coarse place name for `location`.
    pub fn place_name(&self, location: Coordinates) -> Result<String, LookupError> {
        self.by_position(location, None).map(|r| r.place_name())
    }
}

impl TimezoneResolver for TimeZoneDbClient {
    fn resolve_timezone(
        &self,
        location: Coordinates,
        instant: Option<DateTime<Utc>>,
    ) -> Result<TimezoneInfo, LookupError> {
        let report = self.by_position(location, instant)?;
        debug!(%location, zone = %report.zone_id, dst = report.dst, "zone resolved");
        Ok(TimezoneInfo {
            zone_id: report.zone_id,
            local_instant: report.local_instant,
        })
    }
}

impl TimeSource for TimeZoneDbClient {
    fn now(&self) -> Result<DateTime<Utc>, TimeError> {
        self.by_zone("UTC")
            .map(|r| r.local_instant.with_timezone(&Utc))
            .map_err(|e| TimeError::Api(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MADRID_REPLY: &str = r#"{
        "status": "OK",
        "message": "",
        "countryCode": "ES",
        "countryName": "Spain",
        "zoneName": "Europe\/Madrid",
        "gmtOffset": 7200,
        "dst": "1",
        "timestamp": 1718971200
    }"#;

    #[test]
    fn decodes_position_reply() {
        let r = decode_zone_report(MADRID_REPLY).unwrap();
        assert_eq!(r.zone_id, "Europe/Madrid");
        assert!(r.dst);
        // 1718971200 is 2024-06-21T12:00:00 as local wall-clock seconds.
        assert_eq!(r.local_instant.to_rfc3339(), "2024-06-21T12:00:00+02:00");
        assert_eq!(
            r.local_instant.with_timezone(&Utc).to_rfc3339(),
            "2024-06-21T10:00:00+00:00"
        );
    }

    #[test]
    fn place_name_from_zone() {
        let r = decode_zone_report(MADRID_REPLY).unwrap();
        assert_eq!(r.place_name(), "Madrid, Spain(ES)");

        let mut r = r;
        r.zone_id = "America/Argentina/Buenos_Aires".into();
        r.country_name = "Argentina".into();
        r.country_code = "AR".into();
        assert_eq!(r.place_name(), "Buenos Aires, Argentina(AR)");
    }

    #[test]
    fn utc_zone_for_clock() {
        let body =
            r#"{"status":"OK","zoneName":"UTC","gmtOffset":0,"dst":"0","timestamp":1718971200}"#;
        let r = decode_zone_report(body).unwrap();
        assert!(!r.dst);
        assert_eq!(r.local_instant.timestamp(), 1_718_971_200);
    }

    #[test]
    fn failed_status_carries_message() {
        let body = r#"{"status":"FAILED","message":"Invalid API key."}"#;
        assert_eq!(
            decode_zone_report(body).unwrap_err(),
            LookupError::Api {
                service: SERVICE,
                message: "Invalid API key.".into()
            }
        );
    }

    #[test]
    fn missing_zone_is_decode_error() {
        let body = r#"{"status":"OK","gmtOffset":0,"timestamp":0}"#;
        assert!(matches!(decode_zone_report(body), Err(LookupError::Decode(_))));
    }
}
