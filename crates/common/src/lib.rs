//! Shared identifier types for the travel booking system.

pub mod types;

pub use types::{AgentBookingId, BookingId, CustomerId, FlightId};
