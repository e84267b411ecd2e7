//! The "current instant" capability.

use chrono::{DateTime, Utc};

use crate::error::TimeError;

/// Anything that can say what time it is now, in UTC.
pub trait TimeSource {
    fn now(&self) -> Result<DateTime<Utc>, TimeError>;
}

/// The local machine clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> Result<DateTime<Utc>, TimeError> {
        Ok(Utc::now())
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl TimeSource for FixedClock {
    fn now(&self) -> Result<DateTime<Utc>, TimeError> {
        Ok(self.0)
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Box<T> {
    fn now(&self) -> Result<DateTime<Utc>, TimeError> {
        (**self).now()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Result<DateTime<Utc>, TimeError> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fixed_clock_is_fixed() {
        let t = Utc.with_ymd_and_hms(2024, 6, 21, 4, 0, 0).unwrap();
        let clock = FixedClock::new(t);
        assert_eq!(clock.now(), Ok(t));
        assert_eq!(clock.now(), Ok(t));
    }

    #[test]
    fn boxed_source_delegates() {
        let t = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let boxed: Box<dyn TimeSource> = Box::new(FixedClock(t));
        assert_eq!(boxed.now(), Ok(t));
    }

    #[test]
    fn system_clock_is_after_2020() {
        let now = SystemClock.now().unwrap();
        assert!(now > Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
    }
}
