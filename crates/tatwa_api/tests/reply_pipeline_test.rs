//! Recorded service replies fed through the environment.
//!
//! The collaborators here decode canned bodies with the same functions the
//! HTTP clients use, so the whole path from JSON to tatwa runs offline.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Europe::Madrid;
use tatwa_api::google::decode_geocode;
use tatwa_api::sunrise_sunset::decode_solar_day;
use tatwa_api::timezonedb::decode_zone_report;
use tatwa_base::SolarEvent;
use tatwa_engine::{
    Coordinates, Geocoder, LookupError, Providers, SolarDay, SolarEventSource, TatwaEnvironment,
    TimezoneInfo, TimezoneResolver,
};
use tatwa_time::FixedClock;

const SOLAR_REPLY: &str = r#"{
    "results": {
        "sunrise": "2024-06-21T04:44:37+00:00",
        "sunset": "2024-06-21T19:48:41+00:00",
        "solar_noon": "2024-06-21T12:16:39+00:00",
        "day_length": 54244,
        "civil_twilight_begin": "2024-06-21T04:12:13+00:00",
        "civil_twilight_end": "2024-06-21T20:21:05+00:00",
        "nautical_twilight_begin": "2024-06-21T03:31:06+00:00",
        "nautical_twilight_end": "2024-06-21T21:02:12+00:00",
        "astronomical_twilight_begin": "2024-06-21T02:43:03+00:00",
        "astronomical_twilight_end": "2024-06-21T21:50:15+00:00"
    },
    "status": "OK"
}"#;

const ZONE_REPLY: &str = r#"{
    "status": "OK",
    "message": "",
    "countryCode": "ES",
    "countryName": "Spain",
    "zoneName": "Europe\/Madrid",
    "gmtOffset": 7200,
    "dst": "1",
    "timestamp": 1718971200
}"#;

const GEOCODE_REPLY: &str = r#"{
    "results": [{
        "formatted_address": "Madrid, España",
        "geometry": {"location": {"lat": 40.4167754, "lng": -3.7037902}}
    }],
    "status": "OK"
}"#;

struct Recorded;

impl Geocoder for Recorded {
    fn geocode(&self, address: &str) -> Result<Coordinates, LookupError> {
        decode_geocode(GEOCODE_REPLY, address)
    }

    fn reverse_geocode(&self, _location: Coordinates) -> Result<String, LookupError> {
        decode_zone_report(ZONE_REPLY).map(|r| r.place_name())
    }
}

impl TimezoneResolver for Recorded {
    fn resolve_timezone(
        &self,
        _location: Coordinates,
        _instant: Option<DateTime<Utc>>,
    ) -> Result<TimezoneInfo, LookupError> {
        let r = decode_zone_report(ZONE_REPLY)?;
        Ok(TimezoneInfo {
            zone_id: r.zone_id,
            local_instant: r.local_instant,
        })
    }
}

impl SolarEventSource for Recorded {
    fn fetch_solar_events(
        &self,
        _location: Coordinates,
        _date: Option<NaiveDate>,
    ) -> Result<SolarDay, LookupError> {
        decode_solar_day(SOLAR_REPLY)
    }
}

fn environment() -> TatwaEnvironment {
    let now = Madrid.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
    TatwaEnvironment::new(Providers {
        geocoder: Box::new(Recorded),
        timezones: Box::new(Recorded),
        solar: Box::new(Recorded),
        clock: Box::new(FixedClock::new(now.with_timezone(&Utc))),
    })
}

#[test]
fn address_to_tatwas() {
    let mut env = environment();
    env.set_address("Madrid", true).unwrap();
    env.set_solar_date(NaiveDate::from_ymd_opt(2024, 6, 21));
    env.refresh_solar_events().unwrap();

    // Sunrise 06:44:37 local; 07:00 is 923 s in, first tatwa.
    env.set_query_date(NaiveDate::from_ymd_opt(2024, 6, 21));
    env.set_query_time(NaiveTime::from_hms_opt(7, 0, 0));
    let tatwas = env.compute_tatwas().unwrap().clone();

    assert_eq!(env.timezone_id(), Some("Europe/Madrid"));
    let sunrise = tatwas[&SolarEvent::Sunrise].unwrap();
    assert_eq!(sunrise.tatwa.name(), "akash");
    assert_eq!(
        sunrise.start,
        Madrid.with_ymd_and_hms(2024, 6, 21, 6, 44, 37).unwrap()
    );

    // Civil dawn 06:12:13 local; 07:00 is 2867 s in, second tatwa.
    let civil = tatwas[&SolarEvent::CivilTwilightBegin].unwrap();
    assert_eq!(civil.tatwa.name(), "vayu");

    // Astronomical dawn 04:43:03 local is more than two hours back.
    assert!(tatwas[&SolarEvent::AstronomicalTwilightBegin].is_none());
}

#[test]
fn reverse_geocoded_place() {
    let mut env = environment();
    env.set_coordinates(40.4168, -3.7038, true).unwrap();
    assert_eq!(env.address(), Some("Madrid, Spain(ES)"));
}
