//! Time sources and local wall-clock helpers.
//!
//! This crate provides:
//! - The [`TimeSource`] capability used wherever "now" is needed
//! - System, SNTP and fixed clocks
//! - Localization of wall-clock values into an IANA zone

pub mod error;
pub mod local;
pub mod sntp;
pub mod source;

pub use error::TimeError;
pub use local::{combine_local, localize, now_local};
pub use sntp::{DEFAULT_NTP_SERVER, SntpClock};
pub use source::{FixedClock, SystemClock, TimeSource};
