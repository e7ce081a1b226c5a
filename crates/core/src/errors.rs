use thiserror::Error;

use crate::models::person::Person;

/// Failures produced while reading or validating a time slot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Invalid time slot: {0}")]
    Format(String),

    #[error("Invalid date: {0} does not exist.")]
    InvalidCalendarDate(String),

    #[error("Time slot has already started: {0}")]
    Past(String),
}

pub type SlotResult<T> = Result<T, SlotError>;

/// Rejections raised by the person store when a mutation would break one of
/// its invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("This person already exists in the address book: {0}")]
    DuplicatePerson(String),

    #[error("This phone number already exists in the address book, assigned to: {}", .existing.name)]
    DuplicatePhone { existing: Box<Person> },

    #[error("This time slot conflicts with another existing time slot! {} [{}]", .existing.name, slot_label(.existing))]
    SlotConflict { existing: Box<Person> },

    #[error("Person not found: {0}")]
    PersonNotFound(String),
}

impl StoreError {
    /// The record already in the store that caused the rejection, if any.
    pub fn conflicting_person(&self) -> Option<&Person> {
        match self {
            StoreError::DuplicatePhone { existing } | StoreError::SlotConflict { existing } => {
                Some(existing)
            }
            StoreError::DuplicatePerson(_) | StoreError::PersonNotFound(_) => None,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Invalid arguments for the slot filters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("At least one keyword is required")]
    EmptyKeywords,

    #[error("Invalid keyword: '{0}'. Keywords must be a valid date (YYYY-MM-DD) or a valid time (HHMM).")]
    InvalidKeyword(String),

    #[error("Start date must be before or on end date.")]
    InvalidDateRange,

    #[error("Start time must be before or on end time.")]
    InvalidTimeRange,
}

fn slot_label(person: &Person) -> String {
    person
        .time_slot
        .map(|slot| slot.to_string())
        .unwrap_or_default()
}
