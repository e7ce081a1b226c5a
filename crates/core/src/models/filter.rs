//! Predicates for narrowing the person list down by lesson slot.

use chrono::{NaiveDate, NaiveTime};

use crate::errors::FilterError;
use crate::models::person::Person;
use crate::models::time_slot::{parse_date, parse_time};

/// Keeps people whose slot lies inside a date window and a time-of-day window.
///
/// Every bound is optional and inclusive. People without a slot never match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotRange {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
}

impl SlotRange {
    pub fn new(
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
    ) -> Result<Self, FilterError> {
        if let (Some(from), Some(to)) = (start_date, end_date) {
            if from > to {
                return Err(FilterError::InvalidDateRange);
            }
        }
        if let (Some(from), Some(to)) = (start_time, end_time) {
            if from > to {
                return Err(FilterError::InvalidTimeRange);
            }
        }

        Ok(Self {
            start_date,
            end_date,
            start_time,
            end_time,
        })
    }

    pub fn matches(&self, person: &Person) -> bool {
        let Some(slot) = person.time_slot else {
            return false;
        };

        let date = slot.date();
        let within_dates = self.start_date.is_none_or(|from| date >= from)
            && self.end_date.is_none_or(|to| date <= to);
        let within_times = self.start_time.is_none_or(|from| slot.start() >= from)
            && self.end_time.is_none_or(|to| slot.end() <= to);

        within_dates && within_times
    }

    /// Short phrase describing the active bounds, for list headers.
    pub fn describe(&self) -> String {
        let filters: Vec<String> = [
            self.start_date.map(|d| format!("starting from {d}")),
            self.start_time
                .map(|t| format!("starting from {}", t.format("%H:%M"))),
            self.end_date.map(|d| format!("ending by {d}")),
            self.end_time.map(|t| format!("ending by {}", t.format("%H:%M"))),
        ]
        .into_iter()
        .flatten()
        .collect();

        if filters.is_empty() {
            return "with no time filter applied.".to_string();
        }
        format!("with timeslots {}", filters.join(" and "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Date(NaiveDate),
    Time(NaiveTime),
}

/// Keeps people whose slot falls on one of the given dates or starts at one
/// of the given times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotKeywords {
    keywords: Vec<Keyword>,
}

impl SlotKeywords {
    /// Every keyword must be a `YYYY-MM-DD` date or an `HHMM` time.
    pub fn new<I, S>(keywords: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|raw| {
                let raw = raw.as_ref();
                parse_date(raw)
                    .map(Keyword::Date)
                    .or_else(|_| parse_time(raw).map(Keyword::Time))
                    .map_err(|_| FilterError::InvalidKeyword(raw.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if keywords.is_empty() {
            return Err(FilterError::EmptyKeywords);
        }
        Ok(Self { keywords })
    }

    /// Splits whitespace-separated user input into keywords.
    pub fn parse(input: &str) -> Result<Self, FilterError> {
        Self::new(input.split_whitespace())
    }

    pub fn matches(&self, person: &Person) -> bool {
        let Some(slot) = person.time_slot else {
            return false;
        };

        self.keywords.iter().any(|keyword| match keyword {
            Keyword::Date(date) => slot.date() == *date,
            Keyword::Time(time) => slot.start() == *time,
        })
    }
}
