//! Store traits consumed by the travel agent orchestrator.

use async_trait::async_trait;
use common::{AgentBookingId, BookingId, CustomerId, FlightId};
use domain::{Booking, BookingRequest, Customer, Flight, TravelAgentBooking};

use crate::Result;

/// Flight booking persistence.
///
/// `create_booking` performs the full validation chain: bean-style field
/// checks, customer/flight reference resolution, and the uniqueness invariant
/// (one booking per flight per UTC calendar day).
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Validates and persists a new flight booking.
    async fn create_booking(&self, request: BookingRequest) -> Result<Booking>;

    /// Deletes a booking by id. Missing bookings are an error.
    async fn delete_booking(&self, id: BookingId) -> Result<()>;

    /// Looks up a booking by id.
    async fn booking_by_id(&self, id: BookingId) -> Result<Option<Booking>>;

    /// Returns all bookings made by a customer.
    async fn bookings_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Booking>>;

    /// Returns all bookings made against a flight.
    async fn bookings_by_flight(&self, flight_id: FlightId) -> Result<Vec<Booking>>;
}

/// Customer and flight lookup by id.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Looks up a customer by id.
    async fn customer_by_id(&self, id: CustomerId) -> Result<Option<Customer>>;

    /// Looks up a flight by id.
    async fn flight_by_id(&self, id: FlightId) -> Result<Option<Flight>>;
}

/// Travel agent aggregate records.
#[async_trait]
pub trait AgentBookingStore: Send + Sync {
    /// Persists an assembled aggregate record.
    async fn create_agent_booking(&self, booking: TravelAgentBooking)
    -> Result<TravelAgentBooking>;

    /// Deletes an aggregate record by id. Missing records are an error.
    async fn delete_agent_booking(&self, id: AgentBookingId) -> Result<()>;

    /// Looks up an aggregate record by id.
    async fn agent_booking_by_id(&self, id: AgentBookingId) -> Result<Option<TravelAgentBooking>>;

    /// Returns all aggregate records, ordered by creation.
    async fn all_agent_bookings(&self) -> Result<Vec<TravelAgentBooking>>;
}
