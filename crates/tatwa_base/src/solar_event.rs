//! Daily solar events that can serve as tatwa zero-points.
//!
//! Variants are declared in their usual order through the day, so sorted
//! maps keyed by [`SolarEvent`] read chronologically.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TatwaError;

/// A named daily solar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolarEvent {
    /// Sun center 18 deg below the horizon, morning.
    #[serde(alias = "amanecer_astronomico")]
    AstronomicalTwilightBegin,
    /// Sun center 12 deg below the horizon, morning.
    #[serde(alias = "amanecer_nautico")]
    NauticalTwilightBegin,
    /// Sun center 6 deg below the horizon, morning.
    #[serde(alias = "amanecer_civil")]
    CivilTwilightBegin,
    /// Upper limb at the horizon, morning.
    #[serde(alias = "salida")]
    Sunrise,
    /// Meridian transit.
    #[serde(alias = "mediodia")]
    SolarNoon,
    /// Upper limb at the horizon, evening.
    #[serde(alias = "puesta")]
    Sunset,
    /// Sun center 6 deg below the horizon, evening.
    #[serde(alias = "ocaso_civil")]
    CivilTwilightEnd,
    /// Sun center 12 deg below the horizon, evening.
    #[serde(alias = "ocaso_nautico")]
    NauticalTwilightEnd,
    /// Sun center 18 deg below the horizon, evening.
    #[serde(alias = "ocaso_astronomico")]
    AstronomicalTwilightEnd,
}

/// Every solar event, in daily order.
pub const ALL_SOLAR_EVENTS: [SolarEvent; 9] = [
    SolarEvent::AstronomicalTwilightBegin,
    SolarEvent::NauticalTwilightBegin,
    SolarEvent::CivilTwilightBegin,
    SolarEvent::Sunrise,
    SolarEvent::SolarNoon,
    SolarEvent::Sunset,
    SolarEvent::CivilTwilightEnd,
    SolarEvent::NauticalTwilightEnd,
    SolarEvent::AstronomicalTwilightEnd,
];

/// Events that anchor a tatwa cycle: sunrise and the three dawns.
pub const TATWA_ANCHORS: [SolarEvent; 4] = [
    SolarEvent::AstronomicalTwilightBegin,
    SolarEvent::NauticalTwilightBegin,
    SolarEvent::CivilTwilightBegin,
    SolarEvent::Sunrise,
];

impl SolarEvent {
    /// Field name used by sunrise-sunset style APIs.
    pub const fn key(self) -> &'static str {
        match self {
            Self::AstronomicalTwilightBegin => "astronomical_twilight_begin",
            Self::NauticalTwilightBegin => "nautical_twilight_begin",
            Self::CivilTwilightBegin => "civil_twilight_begin",
            Self::Sunrise => "sunrise",
            Self::SolarNoon => "solar_noon",
            Self::Sunset => "sunset",
            Self::CivilTwilightEnd => "civil_twilight_end",
            Self::NauticalTwilightEnd => "nautical_twilight_end",
            Self::AstronomicalTwilightEnd => "astronomical_twilight_end",
        }
    }

    /// Short Spanish label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::AstronomicalTwilightBegin => "amanecer_astronomico",
            Self::NauticalTwilightBegin => "amanecer_nautico",
            Self::CivilTwilightBegin => "amanecer_civil",
            Self::Sunrise => "salida",
            Self::SolarNoon => "mediodia",
            Self::Sunset => "puesta",
            Self::CivilTwilightEnd => "ocaso_civil",
            Self::NauticalTwilightEnd => "ocaso_nautico",
            Self::AstronomicalTwilightEnd => "ocaso_astronomico",
        }
    }

    /// Spanish description for reports.
    pub const fn description(self) -> &'static str {
        match self {
            Self::AstronomicalTwilightBegin => "inicio del amanecer astronómico",
            Self::NauticalTwilightBegin => "inicio del amanecer náutico",
            Self::CivilTwilightBegin => "inicio del amanecer civil",
            Self::Sunrise => "salida del sol",
            Self::SolarNoon => "sol del mediodía",
            Self::Sunset => "puesta del sol",
            Self::CivilTwilightEnd => "fin del ocaso civil",
            Self::NauticalTwilightEnd => "fin del ocaso náutico",
            Self::AstronomicalTwilightEnd => "fin del ocaso astronómico",
        }
    }

    /// Whether the event can anchor a tatwa cycle.
    pub fn is_tatwa_anchor(self) -> bool {
        TATWA_ANCHORS.contains(&self)
    }

    /// All events in daily order.
    pub const fn all() -> &'static [SolarEvent; 9] {
        &ALL_SOLAR_EVENTS
    }
}

impl FromStr for SolarEvent {
    type Err = TatwaError;

    /// Accepts either the API key or the Spanish label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        ALL_SOLAR_EVENTS
            .iter()
            .copied()
            .find(|e| e.key() == normalized || e.label() == normalized)
            .ok_or_else(|| TatwaError::UnknownEvent(s.to_string()))
    }
}

impl Display for SolarEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
