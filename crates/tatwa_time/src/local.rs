//! Wall-clock values in an IANA zone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::error::TimeError;
use crate::source::TimeSource;

/// Attach a zone to a wall-clock value.
///
/// Ambiguous values (DST fall-back) resolve to the earliest instant.
/// Values inside a DST gap fail with [`TimeError::NonexistentLocalTime`].
pub fn localize(tz: Tz, naive: NaiveDateTime) -> Result<DateTime<Tz>, TimeError> {
    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| TimeError::NonexistentLocalTime(naive.to_string(), tz.name().to_string()))
}

/// Current instant as local time in `tz`.
pub fn now_local<C: TimeSource + ?Sized>(tz: Tz, clock: &C) -> Result<DateTime<Tz>, TimeError> {
    Ok(clock.now()?.with_timezone(&tz))
}

/// Join optional date and time components into one local instant.
///
/// Missing components are taken from the current local date/time in `tz`.
/// The clock is only consulted when a component is missing.
pub fn combine_local<C: TimeSource + ?Sized>(
    tz: Tz,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    clock: &C,
) -> Result<DateTime<Tz>, TimeError> {
    match (date, time) {
        (Some(d), Some(t)) => localize(tz, d.and_time(t)),
        (None, None) => now_local(tz, clock),
        (date, time) => {
            let now = now_local(tz, clock)?;
            let d = date.unwrap_or_else(|| now.date_naive());
            let t = time.unwrap_or_else(|| now.time());
            localize(tz, d.and_time(t))
        }
    }
}
