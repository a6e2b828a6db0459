//! Travel agent orchestration.
//!
//! Booking a trip spans three independently-failable systems: the local
//! flight booking store and the remote taxi and hotel reservation services.
//! No transaction covers all three, so the orchestrator runs the steps as a
//! saga:
//! 1. Create the flight booking locally
//! 2. Reserve the taxi
//! 3. Reserve the hotel
//! 4. Persist the aggregate record linking all three
//!
//! Every successful step is pushed onto a compensation log; if a later step
//! fails, the log is unwound in reverse order (release hotel, release taxi,
//! delete flight booking) before the error is surfaced. A compensation that
//! itself fails is reported distinctly so the stranded resource can be
//! reconciled by hand.

pub mod coordinator;
pub mod error;
pub mod services;
pub mod steps;

pub use coordinator::{TravelAgentCoordinator, TravelBookingRequest};
pub use error::{ReleaseFailure, ReleasedReservation, SagaError};
pub use services::{
    CustomerInfo, HttpReservationClient, InMemoryReservationService, RemoteError, Reservation,
    ReservationClient, ReservationRequest, Resource,
};
