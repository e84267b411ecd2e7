//! Plain-text report formatting.

use std::fmt::Write;

use chrono::{DateTime, TimeDelta, TimeZone};
use tatwa_base::SolarEvent;
use tatwa_engine::{TatwaInterval, TatwaSlot};

pub const WIDTH: usize = 79;

const CLOCK: &str = "%H:%M:%S";
const STAMP: &str = "%H:%M:%S %d/%m/%Y";

/// Title framed by rows of asterisks.
pub fn banner() -> String {
    let rule = "*".repeat(WIDTH);
    format!("{rule}\n{:*^WIDTH$}\n{rule}\n", "  T A T W A M E T R O  ")
}

/// Section heading centered in dots.
pub fn heading(title: &str) -> String {
    format!("{:·^WIDTH$}", format!(" {title} "))
}

/// `MM:SS`, saturating at zero.
pub fn format_remaining(remaining: TimeDelta) -> String {
    let secs = remaining.num_seconds().max(0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `HH:MM:SS`, saturating at zero.
pub fn format_duration(duration: TimeDelta) -> String {
    let secs = duration.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
}

pub fn format_stamp<Z: TimeZone>(instant: &DateTime<Z>) -> String
where
    Z::Offset: std::fmt::Display,
{
    instant.format(STAMP).to_string()
}

/// Report block for one anchor event.
pub fn tatwa_block(event: SolarEvent, interval: Option<&TatwaInterval>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", event.label(), event.description());
    match interval {
        None => {
            let _ = writeln!(out, "  tatwa cannot be computed: incoherent dates");
        }
        Some(i) => {
            let _ = writeln!(out, "  Name:           {}", i.tatwa.name());
            let _ = writeln!(
                out,
                "  Position/cycle: {} / {}",
                i.tatwa.position(),
                i.tatwa.cycle()
            );
            let _ = writeln!(out, "  Start:          {}", i.start.format(CLOCK));
            let _ = writeln!(out, "  End:            {}", i.end.format(CLOCK));
            let _ = writeln!(out, "  Remaining:      {}", format_remaining(i.remaining));
        }
    }
    out
}

/// Full cycle table for one anchor event.
pub fn schedule_block(event: SolarEvent, slots: &[TatwaSlot]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] cycle", event.label());
    for slot in slots {
        let _ = writeln!(
            out,
            "  {:>8}  {} - {}",
            slot.tatwa.name(),
            slot.start.format(CLOCK),
            slot.end.format(CLOCK)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Madrid;
    use tatwa_base::Tatwa;
    use tatwa_engine::{cycle_schedule, tatwa_interval};

    #[test]
    fn remaining_is_minutes_and_seconds() {
        assert_eq!(format_remaining(TimeDelta::minutes(23)), "23:00");
        assert_eq!(format_remaining(TimeDelta::seconds(61)), "01:01");
        assert_eq!(format_remaining(TimeDelta::seconds(-5)), "00:00");
    }

    #[test]
    fn day_length_is_hours_minutes_seconds() {
        assert_eq!(format_duration(TimeDelta::seconds(54_244)), "15:04:04");
    }

    #[test]
    fn banner_is_three_full_rows() {
        let b = banner();
        let rows: Vec<&str> = b.lines().collect();
        assert_eq!(rows.len(), 3);
        for row in rows {
            assert_eq!(row.chars().count(), WIDTH);
        }
    }

    #[test]
    fn heading_width() {
        assert_eq!(heading("TATWA").chars().count(), WIDTH);
    }

    #[test]
    fn coherent_block() {
        let sunrise = Madrid.with_ymd_and_hms(2024, 6, 21, 6, 0, 0).unwrap();
        let query = Madrid.with_ymd_and_hms(2024, 6, 21, 6, 25, 0).unwrap();
        let interval = tatwa_interval(sunrise, query).unwrap();
        assert_eq!(interval.tatwa, Tatwa::by_position(2).unwrap());

        let block = tatwa_block(SolarEvent::Sunrise, Some(&interval));
        assert!(block.starts_with("[salida] salida del sol\n"));
        assert!(block.contains("Name:           vayu"));
        assert!(block.contains("Position/cycle: 2 / 1"));
        assert!(block.contains("Start:          06:24:00"));
        assert!(block.contains("End:            06:48:00"));
        assert!(block.contains("Remaining:      23:00"));
    }

    #[test]
    fn incoherent_block() {
        let block = tatwa_block(SolarEvent::CivilTwilightBegin, None);
        assert!(block.contains("incoherent dates"));
    }

    #[test]
    fn schedule_lists_five_rows() {
        let sunrise = Madrid.with_ymd_and_hms(2024, 6, 21, 6, 0, 0).unwrap();
        let block = schedule_block(SolarEvent::Sunrise, &cycle_schedule(sunrise));
        assert_eq!(block.lines().count(), 6);
        assert!(block.contains("akash  06:00:00 - 06:24:00"));
        assert!(block.contains("apas  07:36:00 - 08:00:00"));
    }
}
