// src/models/date_range.rs

//! Announced outage window.

use std::fmt;

use chrono::{DateTime, FixedOffset, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Display format for range boundaries.
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// An outage window `[start, end]` with timezone-aware boundaries.
///
/// `start <= end` is not enforced; providers occasionally publish inverted
/// windows and those are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl DateRange {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self { start, end }
    }

    /// Parse naive `start`/`end` text with `format` and attach `tz`.
    ///
    /// Returns `None` when either side fails to parse or falls into a
    /// DST gap/overlap of `tz`.
    pub fn parse(start: &str, end: &str, format: &str, tz: Tz) -> Option<Self> {
        Some(Self {
            start: parse_local(start, format, tz)?,
            end: parse_local(end, format, tz)?,
        })
    }

    /// The window ends after `now`, i.e. it is active or still ahead.
    pub fn is_upcoming<Z: TimeZone>(&self, now: &DateTime<Z>) -> bool {
        self.end > *now
    }
}

fn parse_local(text: &str, format: &str, tz: Tz) -> Option<DateTime<FixedOffset>> {
    let naive = NaiveDateTime::parse_from_str(text, format).ok()?;
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.fixed_offset()),
        _ => None,
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} – {}",
            self.start.format(DISPLAY_FORMAT),
            self.end.format(DISPLAY_FORMAT)
        )
    }
}
