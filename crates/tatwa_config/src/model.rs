//! Configuration schema and defaults.

use std::fmt::{self, Display, Formatter};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tatwa_base::{SolarEvent, TATWA_ANCHORS};

use crate::error::ConfigError;

const DEFAULT_SUNRISE_SUNSET_URL: &str = "https://api.sunrise-sunset.org/json";
const DEFAULT_TIMEZONEDB_URL: &str = "http://api.timezonedb.com/v2/get-time-zone";
const DEFAULT_GOOGLE_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const DEFAULT_GOOGLE_TIMEZONE_URL: &str = "https://maps.googleapis.com/maps/api/timezone/json";
const DEFAULT_NTP_SERVER: &str = "europe.pool.ntp.org";

/// Where "now" comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeMode {
    /// NTP server.
    #[default]
    Ntp,
    /// TimeZoneDB API.
    Api,
    /// Local machine clock.
    Local,
}

impl FromStr for TimeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ntp" => Ok(Self::Ntp),
            "api" => Ok(Self::Api),
            "local" => Ok(Self::Local),
            other => Err(ConfigError::Invalid(format!(
                "time mode {other:?} (expected ntp, api or local)"
            ))),
        }
    }
}

impl Display for TimeMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ntp => "ntp",
            Self::Api => "api",
            Self::Local => "local",
        })
    }
}

/// Remote API endpoints and credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub google_api_key: Option<String>,
    pub timezonedb_api_key: Option<String>,
    pub sunrise_sunset_url: String,
    pub timezonedb_url: String,
    pub google_geocode_url: String,
    pub google_timezone_url: String,
    /// Per-request HTTP timeout in seconds.
    pub http_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            google_api_key: None,
            timezonedb_api_key: None,
            sunrise_sunset_url: DEFAULT_SUNRISE_SUNSET_URL.into(),
            timezonedb_url: DEFAULT_TIMEZONEDB_URL.into(),
            google_geocode_url: DEFAULT_GOOGLE_GEOCODE_URL.into(),
            google_timezone_url: DEFAULT_GOOGLE_TIMEZONE_URL.into(),
            http_timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Time source selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    pub mode: TimeMode,
    pub ntp_server: String,
    /// NTP reply timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            mode: TimeMode::default(),
            ntp_server: DEFAULT_NTP_SERVER.into(),
            timeout_secs: 5,
        }
    }
}

impl TimeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TatwaConfig {
    pub api: ApiConfig,
    pub time: TimeConfig,
    /// Solar events that anchor tatwa cycles, in report order.
    pub anchors: Vec<SolarEvent>,
}

impl Default for TatwaConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            time: TimeConfig::default(),
            anchors: TATWA_ANCHORS.to_vec(),
        }
    }
}

impl TatwaConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load `path` if given, otherwise start from defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Override fields from variables resolved by `lookup`.
    ///
    /// Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("TATWA_GOOGLE_API_KEY") {
            self.api.google_api_key = Some(key);
        }
        if let Some(key) = get("TATWA_TIMEZONEDB_API_KEY") {
            self.api.timezonedb_api_key = Some(key);
        }
        if let Some(server) = get("TATWA_NTP_SERVER") {
            self.time.ntp_server = server;
        }
        if let Some(mode) = get("TATWA_TIME_MODE") {
            self.time.mode = mode.parse()?;
        }
        self.validate()
    }

    /// Override fields from the process environment.
    pub fn apply_process_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env(|name| std::env::var(name).ok())
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.anchors.is_empty() {
            return Err(ConfigError::Invalid("anchors must not be empty".into()));
        }
        if let Some(e) = self.anchors.iter().find(|e| !e.is_tatwa_anchor()) {
            return Err(ConfigError::Invalid(format!(
                "{} cannot anchor a tatwa cycle",
                e.key()
            )));
        }
        if self.api.http_timeout_secs == 0 {
            return Err(ConfigError::Invalid("api.http_timeout_secs must be > 0".into()));
        }
        if self.time.timeout_secs == 0 {
            return Err(ConfigError::Invalid("time.timeout_secs must be > 0".into()));
        }
        if self.time.ntp_server.trim().is_empty() {
            return Err(ConfigError::Invalid("time.ntp_server must not be empty".into()));
        }
        Ok(())
    }
}
