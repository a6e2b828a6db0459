//! Domain layer for the travel booking system.
//!
//! This crate provides the entities shared by the booking store and the
//! travel agent orchestrator:
//! - Customer, Flight and Booking records with bean-style validation
//! - TaxiBooking / HotelBooking reservation value records
//! - the TravelAgentBooking aggregate linking all three
//! - the `Violations` field→message map produced by validation

pub mod agent;
pub mod booking;
pub mod customer;
pub mod flight;
pub mod validate;

pub use agent::{HotelBooking, TaxiBooking, TravelAgentBooking};
pub use booking::{Booking, BookingRequest, booked_day};
pub use customer::Customer;
pub use flight::Flight;
pub use validate::{Violations, check, in_the_future};
