//! Flight entity.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use common::FlightId;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validate::in_the_future;

static FLIGHT_NO_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}\d{4}$").expect("flight number pattern"));

static PLACE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z'-]+$").expect("place pattern"));

/// A flight that bookings can be made against.
///
/// The flight number is unique across the store; the store enforces that on
/// insert since no single record can see its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Validate, Serialize, Deserialize)]
pub struct Flight {
    pub id: FlightId,

    /// Two capital letters followed by four digits, e.g. `SC8600`.
    #[validate(regex(
        path = *FLIGHT_NO_FORMAT,
        message = "flight number must be two capital letters plus four digits, for example 'SC8600'"
    ))]
    pub flight_no: String,

    #[validate(
        length(min = 1, max = 25, message = "start place must be 1-25 characters"),
        regex(path = *PLACE_FORMAT, message = "please use a place name without numbers or specials")
    )]
    pub start_place: String,

    #[validate(
        length(min = 1, max = 25, message = "destination must be 1-25 characters"),
        regex(path = *PLACE_FORMAT, message = "please use a place name without numbers or specials")
    )]
    pub destination: String,

    #[validate(length(min = 1, max = 25, message = "seats number must be 1-25 characters"))]
    pub seats_number: String,

    #[validate(custom(
        function = in_the_future,
        message = "flight dates can not be in the past, please choose one from the future"
    ))]
    pub flight_date: DateTime<Utc>,
}

impl Flight {
    /// Creates a flight with a fresh random id.
    pub fn new(
        flight_no: impl Into<String>,
        start_place: impl Into<String>,
        destination: impl Into<String>,
        seats_number: impl Into<String>,
        flight_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: FlightId::new(),
            flight_no: flight_no.into(),
            start_place: start_place.into(),
            destination: destination.into(),
            seats_number: seats_number.into(),
            flight_date,
        }
    }
}
