//! Demo contacts.
//!
//! Against a reference time of 2025-10-30 15:30 a reconciliation pass deletes
//! Charlie, rolls Diana forward, and reports Ethan's roll-forward as clashing
//! with Ben. Records carry the legacy `recurring` tag; run them through
//! [`Person::migrate_legacy_tags`] before use.

use chrono::Duration;

use crate::errors::SlotResult;
use crate::models::person::{LEGACY_RECURRING_TAG, Person};
use crate::models::time_slot::TimeSlot;

/// Builds the demo contacts, parsing every slot against `min_duration`.
pub fn sample_persons(min_duration: Duration) -> SlotResult<Vec<Person>> {
    let person = |name: &str, phone: &str, email: &str, address: &str, slot: &str, tags: &[&str]| {
        TimeSlot::parse_with(slot, min_duration).map(|slot| {
            Person::new(name, phone, email, address)
                .with_time_slot(slot)
                .with_tags(tags.iter().copied())
        })
    };

    Ok(vec![
        person(
            "Charlie Goh",
            "93456789",
            "charlie.g@email.com",
            "3 Jurong East",
            "2025-10-22 1500-1700",
            &["Sec4Physics"],
        )?,
        person(
            "Diana Heng",
            "94567890",
            "diana.h@email.com",
            "4 Bishan Street",
            "2025-10-23 1600-1800",
            &["Sec3Math", LEGACY_RECURRING_TAG],
        )?,
        person(
            "Ethan Yeo",
            "95678901",
            "ethan.y@email.com",
            "5 Serangoon Way",
            "2025-10-30 1000-1200",
            &["JC2Physics", LEGACY_RECURRING_TAG],
        )?,
        person(
            "Ben Lim",
            "92345678",
            "ben.l@email.com",
            "2 Clementi Ave",
            "2025-11-06 1000-1200",
            &["JC1Chem", "NeedsHelp"],
        )?,
        person(
            "Alice Tan",
            "91234567",
            "alice.t@email.com",
            "1 Orchard Road",
            "2025-11-05 1400-1600",
            &["Sec3Math"],
        )?,
        person(
            "George Png",
            "97890123",
            "george.p@email.com",
            "7 Pasir Ris Drive",
            "2025-11-10 0900-1100",
            &[],
        )?,
        person(
            "Fiona Wee",
            "96789012",
            "fiona.w@email.com",
            "6 Tampines Link",
            "2025-11-12 1100-1300",
            &["Sec3Math"],
        )?,
    ])
}
