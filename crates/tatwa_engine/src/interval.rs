//! Tatwa sub-intervals following a solar reference event.
//!
//! A solar event `E` opens one cycle of five tatwas lasting
//! [`CYCLE_SECONDS`] in total. A query instant `Q` is coherent with `E`
//! when `E <= Q < E + CYCLE_SECONDS`; outside that window no tatwa is
//! assigned. Pure arithmetic, no lookups.

use chrono::{DateTime, TimeDelta};
use chrono_tz::Tz;
use tatwa_base::{CYCLE_SECONDS, TATWA_COUNT, TATWA_SECONDS, Tatwa, TatwaName};

/// Tatwa active at a query instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TatwaInterval {
    /// Position-mode tatwa (1..=5) within the cycle after the event.
    pub tatwa: Tatwa,
    /// Start of this tatwa.
    pub start: DateTime<Tz>,
    /// End of this tatwa (exclusive).
    pub end: DateTime<Tz>,
    /// Time left from the query instant to `end`.
    pub remaining: TimeDelta,
}

/// One entry of a full-cycle schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TatwaSlot {
    pub tatwa: Tatwa,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

fn tatwa_duration() -> TimeDelta {
    TimeDelta::seconds(TATWA_SECONDS)
}

fn cycle_duration() -> TimeDelta {
    TimeDelta::seconds(CYCLE_SECONDS)
}

/// Position-mode tatwa for a 0-based slot index.
fn slot_tatwa(index: i64) -> Tatwa {
    Tatwa::in_first_cycle(TatwaName::from_index(index))
}

/// Tatwa interval of the cycle opened by `event` that contains `query`.
///
/// Returns `None` when `query` is before `event` or at/after the end of
/// the cycle.
pub fn tatwa_interval(event: DateTime<Tz>, query: DateTime<Tz>) -> Option<TatwaInterval> {
    let elapsed = query.signed_duration_since(event);
    if elapsed < TimeDelta::zero() || elapsed >= cycle_duration() {
        return None;
    }

    // elapsed is non-negative, so truncation is floor
    let index = elapsed.num_seconds() / TATWA_SECONDS;
    let start = event + TimeDelta::seconds(index * TATWA_SECONDS);
    let end = start + tatwa_duration();

    Some(TatwaInterval {
        tatwa: slot_tatwa(index),
        start,
        end,
        remaining: end.signed_duration_since(query),
    })
}

/// All five tatwa slots of the cycle opened by `event`.
pub fn cycle_schedule(event: DateTime<Tz>) -> [TatwaSlot; TATWA_COUNT as usize] {
    std::array::from_fn(|i| {
        let offset = TimeDelta::seconds(i as i64 * TATWA_SECONDS);
        let start = event + offset;
        TatwaSlot {
            tatwa: slot_tatwa(i as i64),
            start,
            end: start + tatwa_duration(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Madrid;

    fn sunrise() -> DateTime<Tz> {
        Madrid.with_ymd_and_hms(2024, 6, 21, 6, 0, 0).unwrap()
    }

    #[test]
    fn at_event_is_first_tatwa() {
        let i = tatwa_interval(sunrise(), sunrise()).unwrap();
        assert_eq!(i.tatwa.position(), 1);
        assert_eq!(i.tatwa.name(), "akash");
        assert_eq!(i.remaining, TimeDelta::seconds(1440));
        assert_eq!(i.start, sunrise());
    }

    #[test]
    fn last_second_of_cycle() {
        let q = sunrise() + TimeDelta::seconds(7199);
        let i = tatwa_interval(sunrise(), q).unwrap();
        assert_eq!(i.tatwa.position(), 5);
        assert_eq!(i.tatwa.name(), "apas");
        assert_eq!(i.remaining, TimeDelta::seconds(1));
    }

    #[test]
    fn cycle_end_is_outside() {
        let q = sunrise() + TimeDelta::seconds(7200);
        assert!(tatwa_interval(sunrise(), q).is_none());
    }

    #[test]
    fn before_event_is_outside() {
        let q = sunrise() - TimeDelta::seconds(1);
        assert!(tatwa_interval(sunrise(), q).is_none());
    }

    #[test]
    fn sub_second_before_boundary_stays_in_slot() {
        let q = sunrise() + TimeDelta::milliseconds(1_439_999);
        let i = tatwa_interval(sunrise(), q).unwrap();
        assert_eq!(i.tatwa.position(), 1);
        assert_eq!(i.remaining, TimeDelta::milliseconds(1));
    }

    #[test]
    fn boundaries_are_half_open() {
        for k in 0..5_i64 {
            let q = sunrise() + TimeDelta::seconds(k * 1440);
            let i = tatwa_interval(sunrise(), q).unwrap();
            assert_eq!(i.tatwa.position(), k as u64 + 1);
            assert_eq!(i.start, q);
        }
    }

    #[test]
    fn schedule_is_contiguous() {
        let s = cycle_schedule(sunrise());
        assert_eq!(s[0].start, sunrise());
        for w in s.windows(2) {
            assert_eq!(w[0].end, w[1].start);
        }
        assert_eq!(s[4].end, sunrise() + TimeDelta::seconds(7200));
        let names: Vec<&str> = s.iter().map(|slot| slot.tatwa.name()).collect();
        assert_eq!(names, ["akash", "vayu", "teja", "prithvi", "apas"]);
    }
}
