//! Integration tests for configuration loading and overrides.

use std::collections::HashMap;
use std::path::PathBuf;

use tatwa_base::SolarEvent;
use tatwa_config::{ConfigError, TatwaConfig, TimeMode};

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn partial_json_keeps_defaults() {
    let c = TatwaConfig::from_json(r#"{ "time": { "mode": "local" } }"#).unwrap();
    assert_eq!(c.time.mode, TimeMode::Local);
    assert_eq!(c.time.ntp_server, "europe.pool.ntp.org");
    assert_eq!(c.api.sunrise_sunset_url, "https://api.sunrise-sunset.org/json");
    assert_eq!(c.anchors, TatwaConfig::default().anchors);
}

#[test]
fn anchors_accept_spanish_labels() {
    let c = TatwaConfig::from_json(r#"{ "anchors": ["salida", "amanecer_civil"] }"#).unwrap();
    assert_eq!(
        c.anchors,
        vec![SolarEvent::Sunrise, SolarEvent::CivilTwilightBegin]
    );
}

#[test]
fn non_anchor_event_rejected() {
    let err = TatwaConfig::from_json(r#"{ "anchors": ["sunset"] }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "got {err:?}");
}

#[test]
fn empty_anchors_rejected() {
    let err = TatwaConfig::from_json(r#"{ "anchors": [] }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn malformed_json_is_parse_error() {
    let err = TatwaConfig::from_json("{ time: ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn env_overrides_keys_and_mode() {
    let vars = env(&[
        ("TATWA_GOOGLE_API_KEY", "g-key"),
        ("TATWA_TIMEZONEDB_API_KEY", "tz-key"),
        ("TATWA_TIME_MODE", "api"),
        ("TATWA_NTP_SERVER", ""),
    ]);
    let mut c = TatwaConfig::default();
    c.apply_env(|k| vars.get(k).cloned()).unwrap();
    assert_eq!(c.api.google_api_key.as_deref(), Some("g-key"));
    assert_eq!(c.api.timezonedb_api_key.as_deref(), Some("tz-key"));
    assert_eq!(c.time.mode, TimeMode::Api);
    // empty values are ignored
    assert_eq!(c.time.ntp_server, "europe.pool.ntp.org");
}

#[test]
fn env_bad_mode_is_invalid() {
    let vars = env(&[("TATWA_TIME_MODE", "sundial")]);
    let mut c = TatwaConfig::default();
    let err = c.apply_env(|k| vars.get(k).cloned()).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn missing_file_is_io_error() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("does-not-exist.json");
    assert!(matches!(TatwaConfig::load(&path), Err(ConfigError::Io(_))));
}

#[test]
fn load_or_default_without_path() {
    assert_eq!(TatwaConfig::load_or_default(None), Ok(TatwaConfig::default()));
}
