//! Tatwa cycle arithmetic and solar reference events.
//!
//! This crate provides:
//! - The five canonical tatwas and their cyclic order
//! - `Tatwa`, a cycle position held either by name or by absolute position
//! - Solar event identifiers used as zero-points for tatwa intervals
//!
//! Everything here is pure arithmetic; no clocks or network access.

pub mod error;
pub mod solar_event;
pub mod tatwa;

pub use error::TatwaError;
pub use solar_event::{ALL_SOLAR_EVENTS, SolarEvent, TATWA_ANCHORS};
pub use tatwa::{
    ALL_TATWAS, CYCLE_SECONDS, TATWA_COUNT, TATWA_SECONDS, Tatwa, TatwaMode, TatwaName,
    TatwaOperand,
};
