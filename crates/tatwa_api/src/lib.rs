//! Web-service collaborators for the tatwa environment.
//!
//! This crate provides blocking `ureq` clients for:
//! - sunrise-sunset.org (solar events, no key)
//! - TimeZoneDB (timezone, coarse reverse geocoding, remote clock)
//! - Google Maps (geocoding, reverse geocoding, timezone)
//!
//! Each client keeps its JSON decoding in a pure `decode_*` function so
//! replies can be checked without the network.

mod http;

pub mod google;
pub mod services;
pub mod sunrise_sunset;
pub mod timezonedb;

pub use google::GoogleMapsClient;
pub use services::{LocationServices, clock_from_config, providers_from_config};
pub use sunrise_sunset::SunriseSunsetClient;
pub use timezonedb::{TimeZoneDbClient, ZoneReport};
