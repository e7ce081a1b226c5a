pub mod filter;
pub mod person;
pub mod time_slot;
