use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::errors::{SlotError, SlotResult};

/// Shortest slot accepted by [`TimeSlot::parse`], in minutes.
pub const DEFAULT_MIN_DURATION_MINUTES: i64 = 1;

/// Largest year representable in the `YYYY-MM-DD` form.
const MAX_YEAR: i32 = 9999;

pub const MESSAGE_CONSTRAINTS: &str = "TimeSlot should be in the format YYYY-MM-DD HHMM-HHMM, \
     where start time is before end time and the duration is at least the minimum length. \
     Example: 2025-10-12 1600-1800";

/// A lesson slot: one calendar date with a wall-clock start and end.
///
/// Slots are immutable values. Ordering is by date, then start, then end,
/// which is exactly the field order below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeSlot {
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeSlot {
    /// Builds a slot from its parts, enforcing `start < end` and the minimum duration.
    pub fn new(
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        min_duration: Duration,
    ) -> SlotResult<Self> {
        if start >= end || end - start < min_duration {
            return Err(SlotError::Format(MESSAGE_CONSTRAINTS.to_string()));
        }

        Ok(Self { date, start, end })
    }

    /// Parses `"YYYY-MM-DD HHMM-HHMM"` with the default minimum duration.
    pub fn parse(text: &str) -> SlotResult<Self> {
        Self::parse_with(text, default_min_duration())
    }

    /// Parses `"YYYY-MM-DD HHMM-HHMM"`.
    ///
    /// A well-formed date that does not exist on the calendar (`2025-02-30`)
    /// fails with [`SlotError::InvalidCalendarDate`]; every other problem is a
    /// [`SlotError::Format`].
    pub fn parse_with(text: &str, min_duration: Duration) -> SlotResult<Self> {
        let parts: Vec<&str> = text.trim().split(' ').collect();
        let [date_part, time_part] = parts.as_slice() else {
            return Err(format_error());
        };

        let date = parse_date(date_part)?;

        let times: Vec<&str> = time_part.split('-').collect();
        let [start_part, end_part] = times.as_slice() else {
            return Err(format_error());
        };
        let start = parse_time(start_part)?;
        let end = parse_time(end_part)?;

        Self::new(date, start, end, min_duration)
    }

    /// Returns true if `text` parses with the default minimum duration.
    pub fn is_valid(text: &str) -> bool {
        Self::parse(text).is_ok()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn start_instant(&self) -> NaiveDateTime {
        self.date.and_time(self.start)
    }

    pub fn end_instant(&self) -> NaiveDateTime {
        self.date.and_time(self.end)
    }

    /// True iff the slot ended strictly before `reference`.
    ///
    /// A slot ending exactly at `reference` is not past.
    pub fn is_past(&self, reference: NaiveDateTime) -> bool {
        self.end_instant() < reference
    }

    /// True iff the slot's start is strictly before `reference`.
    ///
    /// Unlike [`TimeSlot::is_past`] this also holds while the slot is in progress.
    pub fn has_started(&self, reference: NaiveDateTime) -> bool {
        self.start_instant() < reference
    }

    /// Rejects slots that have already started, for callers booking new lessons.
    pub fn ensure_not_started(&self, reference: NaiveDateTime) -> SlotResult<()> {
        if self.has_started(reference) {
            return Err(SlotError::Past(self.to_string()));
        }
        Ok(())
    }

    /// Two slots overlap when they share a date and their intervals intersect.
    /// Touching slots (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        if self.date != other.date {
            return false;
        }
        self.start < other.end && other.start < self.end
    }

    /// Earliest weekly repetition of this slot starting at or after `reference`.
    ///
    /// Returns an equal slot when this one has not started yet.
    pub fn next_occurrence(&self, reference: NaiveDateTime) -> TimeSlot {
        self.roll_forward(Duration::weeks(1), reference)
    }

    /// Advances the slot by whole `period`s until its start is no longer before
    /// `reference`. `period` must be a positive number of whole days so that
    /// the wall-clock start and end are preserved.
    ///
    /// Dates never move past year 9999, the last year the four-digit text
    /// form can express; a slot that would need to goes no further than its
    /// last occurrence in that year, even if that is still before `reference`.
    pub(crate) fn roll_forward(&self, period: Duration, reference: NaiveDateTime) -> TimeSlot {
        debug_assert!(period > Duration::zero());

        let mut date = self.date;
        while date.and_time(self.start) < reference {
            match date.checked_add_signed(period) {
                Some(next) if next.year() <= MAX_YEAR => date = next,
                _ => break,
            }
        }

        TimeSlot { date, ..*self }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}{:02}-{:02}{:02}",
            self.date.format("%Y-%m-%d"),
            self.start.hour(),
            self.start.minute(),
            self.end.hour(),
            self.end.minute()
        )
    }
}

impl FromStr for TimeSlot {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

pub fn default_min_duration() -> Duration {
    Duration::minutes(DEFAULT_MIN_DURATION_MINUTES)
}

fn format_error() -> SlotError {
    SlotError::Format(MESSAGE_CONSTRAINTS.to_string())
}

/// Strict `YYYY-MM-DD`. Shape errors are format errors; a well-shaped date
/// that is not on the calendar is an [`SlotError::InvalidCalendarDate`].
pub(crate) fn parse_date(text: &str) -> SlotResult<NaiveDate> {
    let bytes = text.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !well_formed {
        return Err(format_error());
    }

    let field = |range: std::ops::Range<usize>| text[range].parse::<u32>().map_err(|_| format_error());
    let year = field(0..4)? as i32;
    let month = field(5..7)?;
    let day = field(8..10)?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| SlotError::InvalidCalendarDate(text.to_string()))
}

/// Strict four-digit `HHMM`.
pub(crate) fn parse_time(text: &str) -> SlotResult<NaiveTime> {
    if text.len() != 4 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format_error());
    }

    let hour = text[0..2].parse::<u32>().map_err(|_| format_error())?;
    let minute = text[2..4].parse::<u32>().map_err(|_| format_error())?;

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(format_error)
}
