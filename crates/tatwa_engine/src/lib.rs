//! Tatwa environment: one computation session tying a location, a solar
//! reference date and a query instant to the tatwa active at that instant.
//!
//! This crate provides:
//! - [`TatwaEnvironment`], the session state machine
//! - Collaborator traits for geocoding, timezone and solar-event lookup
//! - Pure interval arithmetic from a solar event to tatwa sub-intervals
//!
//! All lookups are blocking and go through the injected [`Providers`];
//! "now" comes from an injected [`tatwa_time::TimeSource`].

pub mod environment;
pub mod error;
pub mod event_time;
pub mod interval;
pub mod location;
pub mod provider;
pub mod state;

pub use environment::{TatwaEnvironment, TatwaMap};
pub use error::{EnvironmentError, LookupError};
pub use event_time::EventTime;
pub use interval::{TatwaInterval, TatwaSlot, cycle_schedule, tatwa_interval};
pub use location::{Coordinates, TimezoneInfo};
pub use provider::{Geocoder, Providers, SolarDay, SolarEventSource, TimezoneResolver};
pub use state::StateField;
