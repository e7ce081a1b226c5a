use std::collections::BTreeSet;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::models::time_slot::TimeSlot;

/// Tag that older data sets used to mark a weekly lesson.
pub const LEGACY_RECURRING_TAG: &str = "recurring";

/// What happens to a person's slot once it is in the past.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    /// The booking is dropped together with the contact.
    #[default]
    None,
    /// The slot rolls forward one week at a time.
    Weekly,
}

impl Recurrence {
    /// Step used to roll a past slot forward, or `None` for one-off bookings.
    pub fn period(self) -> Option<Duration> {
        match self {
            Recurrence::None => None,
            Recurrence::Weekly => Some(Duration::weeks(1)),
        }
    }

    /// Reads the recurrence policy out of a legacy tag set.
    ///
    /// `marker` is compared case-insensitively.
    pub fn from_tags<'a, I>(tags: I, marker: &str) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        if tags.into_iter().any(|tag| tag.eq_ignore_ascii_case(marker)) {
            Recurrence::Weekly
        } else {
            Recurrence::None
        }
    }
}

/// A contact in the address book, optionally holding one lesson slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    #[serde(default)]
    pub time_slot: Option<TimeSlot>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub recurrence: Recurrence,
}

impl Person {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            address: address.into(),
            time_slot: None,
            tags: BTreeSet::new(),
            recurrence: Recurrence::None,
        }
    }

    pub fn with_time_slot(mut self, slot: TimeSlot) -> Self {
        self.time_slot = Some(slot);
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    /// Identity check used for duplicate detection: two people are the same
    /// contact when their names match. Phone and slot are not considered.
    pub fn is_same_person(&self, other: &Person) -> bool {
        self.name == other.name
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.period().is_some()
    }

    /// Copy of this person with the slot replaced.
    pub fn rescheduled(&self, slot: TimeSlot) -> Person {
        Person {
            time_slot: Some(slot),
            ..self.clone()
        }
    }

    /// Moves a legacy recurrence tag into the typed [`Recurrence`] field.
    ///
    /// Any tag matching `marker` (case-insensitive) is dropped from the tag set.
    /// An explicit recurrence already on the record is kept.
    pub fn migrate_legacy_tags(mut self, marker: &str) -> Person {
        if Recurrence::from_tags(&self.tags, marker) == Recurrence::Weekly {
            self.recurrence = Recurrence::Weekly;
            self.tags.retain(|tag| !tag.eq_ignore_ascii_case(marker));
        }
        self
    }
}
