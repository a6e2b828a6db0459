//! Local persistence contracts for the travel booking system.
//!
//! This crate defines the collaborator traits the travel agent orchestrator
//! consumes:
//! - [`BookingStore`] — flight booking create/find/delete with the
//!   one-booking-per-flight-per-day invariant
//! - [`Directory`] — customer and flight lookup by id
//! - [`AgentBookingStore`] — the travel agent aggregate records
//!
//! [`InMemoryBookingStore`] implements all three behind async `RwLock`s; each
//! call is atomic with respect to the others.

pub mod error;
pub mod memory;
pub mod store;

pub use error::StoreError;
pub use memory::InMemoryBookingStore;
pub use store::{AgentBookingStore, BookingStore, Directory};

/// Convenience type alias for store results.
pub type Result<T> = std::result::Result<T, StoreError>;
