//! # Person Store
//!
//! Owns the live list of contacts and keeps three invariants after every
//! successful mutation:
//!
//! - no two people share an identity (name),
//! - no two people share a phone number,
//! - no two people hold overlapping slots.
//!
//! A rejected mutation leaves the collection untouched. The store does no
//! locking; callers needing shared access must wrap it themselves.

use std::collections::BTreeSet;

use tracing::debug;

use crate::errors::{StoreError, StoreResult};
use crate::models::person::Person;
use crate::models::time_slot::TimeSlot;
use crate::registry::{NoopObserver, SlotObserver};

#[derive(Debug, Clone, Default)]
pub struct PersonStore<O: SlotObserver = NoopObserver> {
    persons: Vec<Person>,
    observer: O,
}

impl PersonStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: SlotObserver> PersonStore<O> {
    /// Creates an empty store that reports slot changes to `observer`.
    pub fn with_observer(observer: O) -> Self {
        Self {
            persons: Vec::new(),
            observer,
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Every person, in insertion order.
    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// True if someone with the same identity as `person` is stored.
    pub fn contains(&self, person: &Person) -> bool {
        self.persons.iter().any(|p| p.is_same_person(person))
    }

    /// Inserts a new person.
    ///
    /// # Errors
    ///
    /// * `StoreError::DuplicatePerson` - someone with the same name exists
    /// * `StoreError::DuplicatePhone` - the phone number is taken
    /// * `StoreError::SlotConflict` - the slot overlaps an existing booking
    pub fn add(&mut self, person: Person) -> StoreResult<()> {
        if self.contains(&person) {
            return Err(StoreError::DuplicatePerson(person.name));
        }

        if let Some(existing) = self.find_duplicate_phone(&person.phone, None) {
            return Err(StoreError::DuplicatePhone {
                existing: Box::new(existing.clone()),
            });
        }

        if let Some(slot) = &person.time_slot {
            if let Some(existing) = self.find_conflict(slot, None) {
                return Err(StoreError::SlotConflict {
                    existing: Box::new(existing.clone()),
                });
            }
        }

        debug!(name = %person.name, slot = ?person.time_slot, "Added person");
        let slot = person.time_slot;
        self.persons.push(person);
        if let Some(slot) = &slot {
            self.observer.slot_added(slot);
        }
        Ok(())
    }

    /// Replaces `target` with `replacement`.
    ///
    /// The slot check only runs when the slot actually changes, and the phone
    /// check only runs when the phone changes, so editing unrelated fields
    /// never trips over a booking that was already accepted.
    ///
    /// # Errors
    ///
    /// * `StoreError::PersonNotFound` - `target` is not in the store
    /// * `StoreError::DuplicatePerson` - the new name belongs to someone else
    /// * `StoreError::SlotConflict` - the new slot overlaps another booking
    /// * `StoreError::DuplicatePhone` - the new phone belongs to someone else
    pub fn update(&mut self, target: &Person, replacement: Person) -> StoreResult<()> {
        let index = self
            .persons
            .iter()
            .position(|p| p == target)
            .ok_or_else(|| StoreError::PersonNotFound(target.name.clone()))?;

        if !target.is_same_person(&replacement) && self.contains(&replacement) {
            return Err(StoreError::DuplicatePerson(replacement.name));
        }

        let slot_changed = target.time_slot != replacement.time_slot;
        if slot_changed {
            if let Some(slot) = &replacement.time_slot {
                if let Some(existing) = self.find_conflict(slot, Some(target)) {
                    return Err(StoreError::SlotConflict {
                        existing: Box::new(existing.clone()),
                    });
                }
            }
        }

        if target.phone != replacement.phone {
            if let Some(existing) = self.find_duplicate_phone(&replacement.phone, Some(target)) {
                return Err(StoreError::DuplicatePhone {
                    existing: Box::new(existing.clone()),
                });
            }
        }

        if slot_changed {
            if let Some(old) = &target.time_slot {
                self.observer.slot_removed(old);
            }
            if let Some(new) = &replacement.time_slot {
                self.observer.slot_added(new);
            }
        }

        debug!(
            from = %target.name,
            to = %replacement.name,
            slot = ?replacement.time_slot,
            "Updated person"
        );
        self.persons[index] = replacement;
        Ok(())
    }

    /// Removes `target` if present and returns it.
    pub fn remove(&mut self, target: &Person) -> Option<Person> {
        let index = self.persons.iter().position(|p| p == target)?;
        let removed = self.persons.remove(index);

        if let Some(slot) = &removed.time_slot {
            self.observer.slot_removed(slot);
        }

        debug!(name = %removed.name, "Removed person");
        Some(removed)
    }

    /// First person, in insertion order, whose slot overlaps `slot`.
    ///
    /// `ignoring` skips the record with that identity, so an edited person is
    /// not reported as conflicting with its own previous booking.
    pub fn find_conflict(&self, slot: &TimeSlot, ignoring: Option<&Person>) -> Option<&Person> {
        self.persons
            .iter()
            .filter(|p| ignoring.is_none_or(|ignored| !p.is_same_person(ignored)))
            .find(|p| p.time_slot.as_ref().is_some_and(|own| own.overlaps(slot)))
    }

    /// Replaces the whole collection without invariant checks, for bulk loads
    /// of data that was valid when saved. The observer is re-synced.
    pub fn reset(&mut self, persons: Vec<Person>) {
        self.persons = persons;
        let slots: BTreeSet<TimeSlot> = self.persons.iter().filter_map(|p| p.time_slot).collect();
        self.observer.slots_reloaded(&slots);
        debug!(count = self.persons.len(), "Store reset");
    }

    /// People ordered by slot; those without a slot come last.
    pub fn sorted_by_slot(&self) -> Vec<&Person> {
        let mut sorted: Vec<&Person> = self.persons.iter().collect();
        sorted.sort_by(|a, b| match (&a.time_slot, &b.time_slot) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        sorted
    }

    pub fn filtered<P>(&self, predicate: P) -> Vec<&Person>
    where
        P: Fn(&Person) -> bool,
    {
        self.persons.iter().filter(|p| predicate(*p)).collect()
    }

    fn find_duplicate_phone(&self, phone: &str, ignoring: Option<&Person>) -> Option<&Person> {
        self.persons
            .iter()
            .filter(|p| ignoring.is_none_or(|ignored| !p.is_same_person(ignored)))
            .find(|p| p.phone == phone)
    }
}
