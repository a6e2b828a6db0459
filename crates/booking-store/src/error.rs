//! Store error types.

use chrono::NaiveDate;
use common::{AgentBookingId, BookingId, CustomerId, FlightId};
use domain::Violations;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record failed bean-style validation.
    #[error("validation failed: {0}")]
    Validation(Violations),

    /// The flight already has a booking on the same UTC calendar day.
    #[error("flight {flight_id} is already booked on {day}")]
    DuplicateBooking { flight_id: FlightId, day: NaiveDate },

    /// A flight with the same flight number already exists.
    #[error("a flight with number {0} already exists")]
    DuplicateFlightNo(String),

    /// The referenced customer does not exist.
    #[error("customer {0} not found")]
    CustomerNotFound(CustomerId),

    /// The referenced flight does not exist.
    #[error("flight {0} not found")]
    FlightNotFound(FlightId),

    /// The booking does not exist.
    #[error("booking {0} not found")]
    BookingNotFound(BookingId),

    /// The travel agent aggregate record does not exist.
    #[error("agent booking {0} not found")]
    AgentBookingNotFound(AgentBookingId),
}

impl From<Violations> for StoreError {
    fn from(violations: Violations) -> Self {
        StoreError::Validation(violations)
    }
}
