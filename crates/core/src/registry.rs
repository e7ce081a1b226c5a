//! Bookkeeping hooks fired by [`PersonStore`](crate::store::PersonStore) after
//! successful mutations.
//!
//! Observers hold a derived copy of the booked slots. The store never reads
//! them back; its conflict checks always scan the live records.

use std::collections::BTreeSet;

use crate::models::time_slot::TimeSlot;

pub trait SlotObserver {
    /// A record holding `slot` entered the store, or an existing record moved to it.
    fn slot_added(&mut self, slot: &TimeSlot);

    /// A record holding `slot` left the store, or an existing record moved off it.
    fn slot_removed(&mut self, slot: &TimeSlot);

    /// The whole collection was replaced; `slots` is every slot now booked.
    fn slots_reloaded(&mut self, slots: &BTreeSet<TimeSlot>);
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SlotObserver for NoopObserver {
    fn slot_added(&mut self, _slot: &TimeSlot) {}

    fn slot_removed(&mut self, _slot: &TimeSlot) {}

    fn slots_reloaded(&mut self, _slots: &BTreeSet<TimeSlot>) {}
}

/// In-memory set of booked slots, kept in step with the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotRegistry {
    slots: BTreeSet<TimeSlot>,
}

impl SlotRegistry {
    pub fn all_slots(&self) -> &BTreeSet<TimeSlot> {
        &self.slots
    }

    pub fn contains(&self, slot: &TimeSlot) -> bool {
        self.slots.contains(slot)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl SlotObserver for SlotRegistry {
    fn slot_added(&mut self, slot: &TimeSlot) {
        self.slots.insert(*slot);
    }

    fn slot_removed(&mut self, slot: &TimeSlot) {
        self.slots.remove(slot);
    }

    fn slots_reloaded(&mut self, slots: &BTreeSet<TimeSlot>) {
        self.slots = slots.clone();
    }
}
