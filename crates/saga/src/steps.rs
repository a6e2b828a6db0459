//! Saga steps and the compensation log.

use common::BookingId;

/// Step name: create the flight booking in the local store.
pub const STEP_BOOK_FLIGHT: &str = "book_flight";

/// Step name: reserve the taxi through the remote taxi service.
pub const STEP_RESERVE_TAXI: &str = "reserve_taxi";

/// Step name: reserve the hotel through the remote hotel service.
pub const STEP_RESERVE_HOTEL: &str = "reserve_hotel";

/// Step name: persist the aggregate record linking all three reservations.
pub const STEP_RECORD_AGENT_BOOKING: &str = "record_agent_booking";

/// A successfully completed booking step, paired with everything its
/// compensating action needs.
///
/// The coordinator pushes one entry per success and unwinds the list in
/// reverse when a later step fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletedStep {
    /// The flight booking exists locally; compensation deletes it.
    FlightBooked(BookingId),
    /// The taxi reservation exists remotely; compensation releases it.
    TaxiReserved(String),
    /// The hotel reservation exists remotely; compensation releases it.
    HotelReserved(String),
}

impl CompletedStep {
    /// The name of the step this entry completed.
    pub fn step_name(&self) -> &'static str {
        match self {
            CompletedStep::FlightBooked(_) => STEP_BOOK_FLIGHT,
            CompletedStep::TaxiReserved(_) => STEP_RESERVE_TAXI,
            CompletedStep::HotelReserved(_) => STEP_RESERVE_HOTEL,
        }
    }

    /// Which system holds the resource this entry would release.
    pub fn service(&self) -> &'static str {
        match self {
            CompletedStep::FlightBooked(_) => "booking-store",
            CompletedStep::TaxiReserved(_) => "taxi",
            CompletedStep::HotelReserved(_) => "hotel",
        }
    }

    /// The id of the resource this entry would release.
    pub fn reference(&self) -> String {
        match self {
            CompletedStep::FlightBooked(id) => id.to_string(),
            CompletedStep::TaxiReserved(id) | CompletedStep::HotelReserved(id) => id.clone(),
        }
    }
}
