//! Business-hours evaluation.
//!
//! Times of day are compared as `hour * 100 + minute` (`09:30` → `930`).
//! This is not a minute count, but both sides of every comparison use the
//! same encoding so ordering is preserved.

use {
    chrono::{Datelike, Local, Timelike},
    tracing::debug,
};

use wabubble_config::{BusinessHours, Weekday};

/// Encode a time of day as `hour * 100 + minute`.
pub fn encode_time(hour: u32, minute: u32) -> u32 {
    hour * 100 + minute
}

/// Parse an `HH:MM` bound into its encoded form.
///
/// Whitespace around either component is tolerated, an empty component reads
/// as zero (`":30"` is `0:30`) and anything after the second component is
/// ignored. Returns `None` when a component is missing or not a number.
pub fn parse_clock(s: &str) -> Option<u32> {
    let mut parts = s.split(':');
    let hour = clock_component(parts.next()?)?;
    let minute = clock_component(parts.next()?)?;
    hour.checked_mul(100)?.checked_add(minute)
}

fn clock_component(part: &str) -> Option<u32> {
    let part = part.trim();
    if part.is_empty() {
        return Some(0);
    }
    part.parse().ok()
}

/// Whether `now` falls inside the schedule, both bounds inclusive.
///
/// A weekday without an entry, or with a bound that does not parse, is never
/// available.
pub fn is_open_at<T: Datelike + Timelike>(hours: &BusinessHours, now: &T) -> bool {
    let Some(day) = Weekday::from_days_from_sunday(now.weekday().num_days_from_sunday()) else {
        return false;
    };
    let Some(window) = hours.get(day) else {
        return false;
    };
    let (Some(start), Some(end)) = (parse_clock(&window.start), parse_clock(&window.end)) else {
        debug!(
            day = day.name(),
            start = %window.start,
            end = %window.end,
            "unparseable business hours, treating as closed"
        );
        return false;
    };
    let current = encode_time(now.hour(), now.minute());
    start <= current && current <= end
}

/// [`is_open_at`] evaluated against the local wall clock.
pub fn is_open_now(hours: &BusinessHours) -> bool {
    is_open_at(hours, &Local::now())
}

/// Availability shown next to the agent name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Online,
    Away,
}

impl Availability {
    pub fn at<T: Datelike + Timelike>(hours: &BusinessHours, now: &T) -> Self {
        is_open_at(hours, now).into()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Away => "Away",
        }
    }
}

impl From<bool> for Availability {
    fn from(open: bool) -> Self {
        if open { Self::Online } else { Self::Away }
    }
}
