//! Configuration for the tatwa environment and its collaborators.
//!
//! A [`TatwaConfig`] is read from a JSON file, falls back to defaults for
//! anything missing, and can be overridden from environment variables:
//!
//! | Variable                   | Field                    |
//! |----------------------------|--------------------------|
//! | `TATWA_GOOGLE_API_KEY`     | `api.google_api_key`     |
//! | `TATWA_TIMEZONEDB_API_KEY` | `api.timezonedb_api_key` |
//! | `TATWA_NTP_SERVER`         | `time.ntp_server`        |
//! | `TATWA_TIME_MODE`          | `time.mode`              |

pub mod error;
pub mod model;

pub use error::ConfigError;
pub use model::{ApiConfig, TatwaConfig, TimeConfig, TimeMode};
