//! # Slotbook Core
//!
//! Contacts with weekly or one-off lesson slots, kept free of double bookings.
//!
//! - **Models**: the [`TimeSlot`](models::time_slot::TimeSlot) value, the
//!   [`Person`](models::person::Person) record and list filters
//! - **Store**: conflict-checked add, update and remove
//! - **Reconcile**: batch retirement of past slots
//! - **Registry**: observers mirroring the booked slots

pub mod config;
pub mod errors;
pub mod models;
pub mod reconcile;
pub mod registry;
pub mod sample;
pub mod store;
