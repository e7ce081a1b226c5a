//! # Past Slot Reconciliation
//!
//! Retires every slot that has already ended:
//!
//! 1. Snapshot the store and classify each past booking. One-off bookings are
//!    queued for deletion; recurring ones are queued for an update to their
//!    next occurrence, computed up front.
//! 2. Apply all deletions.
//! 3. Apply all updates through [`PersonStore::update`], so each roll-forward
//!    gets the same conflict checks as a manual edit.
//!
//! Deletions always run before updates. A record deleted in step 2 can no
//! longer block a roll-forward in step 3.
//!
//! Each record is handled on its own. A rejected update is recorded in the
//! report and the record keeps its old slot; the rest of the batch continues.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::StoreError;
use crate::models::person::Person;
use crate::models::time_slot::TimeSlot;
use crate::registry::SlotObserver;
use crate::store::PersonStore;

/// A recurring person whose slot will be moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpdate {
    pub original: Person,
    pub next_slot: TimeSlot,
}

/// Work decided from one snapshot, before anything is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationPlan {
    pub deletions: Vec<Person>,
    pub updates: Vec<PendingUpdate>,
}

/// Why a recurring person could not be rolled forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReconcileConflict {
    /// The next occurrence overlaps another booking.
    Slot {
        person: String,
        attempted: TimeSlot,
        conflicting_person: String,
        conflicting_slot: Option<TimeSlot>,
    },
    /// The store rejected the update for a reason other than a slot clash.
    Unexpected { person: String, reason: String },
}

impl ReconcileConflict {
    pub fn person(&self) -> &str {
        match self {
            ReconcileConflict::Slot { person, .. } | ReconcileConflict::Unexpected { person, .. } => {
                person
            }
        }
    }
}

impl fmt::Display for ReconcileConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileConflict::Slot {
                person,
                attempted,
                conflicting_person,
                conflicting_slot,
            } => {
                write!(
                    f,
                    "{person}'s next recurring slot [{attempted}] conflicts with {conflicting_person}"
                )?;
                if let Some(slot) = conflicting_slot {
                    write!(f, " [{slot}]")?;
                }
                Ok(())
            }
            ReconcileConflict::Unexpected { person, reason } => {
                write!(f, "{person} (Error: {reason})")
            }
        }
    }
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationReport {
    pub deleted: Vec<String>,
    pub updated: Vec<String>,
    pub conflicts: Vec<ReconcileConflict>,
}

impl ReconciliationReport {
    /// True when the pass found nothing to delete, update or report.
    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty() && self.updated.is_empty() && self.conflicts.is_empty()
    }
}

/// Classifies `persons` against `reference` without touching anything.
///
/// People without a slot, or whose slot has not ended, are left out.
pub fn plan(persons: &[Person], reference: NaiveDateTime) -> ReconciliationPlan {
    let mut plan = ReconciliationPlan::default();

    for person in persons {
        let Some(slot) = person.time_slot else {
            continue;
        };
        if !slot.is_past(reference) {
            continue;
        }

        match person.recurrence.period() {
            Some(period) => plan.updates.push(PendingUpdate {
                original: person.clone(),
                next_slot: slot.roll_forward(period, reference),
            }),
            None => plan.deletions.push(person.clone()),
        }
    }

    plan
}

/// Turns a rejected roll-forward into a report entry.
///
/// Only slot clashes occur today: the pass changes nothing but the slot of a
/// record taken from the same snapshot, so identity, phone and lookup checks
/// all pass. Any other rejection is still reported as `Unexpected` rather
/// than dropped.
fn conflict_from_error(person: String, attempted: TimeSlot, err: StoreError) -> ReconcileConflict {
    match err {
        StoreError::SlotConflict { existing } => {
            let existing = *existing;
            warn!(
                person = %person,
                attempted = %attempted,
                conflicting = %existing.name,
                "Recurring slot could not be rolled forward"
            );
            ReconcileConflict::Slot {
                person,
                attempted,
                conflicting_person: existing.name,
                conflicting_slot: existing.time_slot,
            }
        }
        err => {
            warn!(person = %person, error = %err, "Unexpected error while updating recurring person");
            ReconcileConflict::Unexpected {
                person,
                reason: err.to_string(),
            }
        }
    }
}

/// Runs one reconciliation pass over `store`.
pub fn run<O: SlotObserver>(
    store: &mut PersonStore<O>,
    reference: NaiveDateTime,
) -> ReconciliationReport {
    let snapshot = store.persons().to_vec();
    let plan = plan(&snapshot, reference);
    let mut report = ReconciliationReport::default();

    for person in &plan.deletions {
        if store.remove(person).is_some() {
            report.deleted.push(person.name.clone());
        }
    }

    for PendingUpdate {
        original,
        next_slot,
    } in plan.updates
    {
        let replacement = original.rescheduled(next_slot);
        match store.update(&original, replacement) {
            Ok(()) => report.updated.push(original.name),
            Err(err) => report.conflicts.push(conflict_from_error(original.name, next_slot, err)),
        }
    }

    info!(
        deleted = report.deleted.len(),
        updated = report.updated.len(),
        conflicts = report.conflicts.len(),
        %reference,
        "Reconciled past slots"
    );
    report
}
