//! Flight booking entity and creation payload.

use chrono::{DateTime, NaiveDate, Utc};
use common::{BookingId, CustomerId, FlightId};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validate::in_the_future;

/// A flight booking held in the local store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub customer_id: CustomerId,
    pub flight_id: FlightId,
    pub booking_date: DateTime<Utc>,
}

impl Booking {
    /// The UTC calendar day this booking occupies on its flight.
    pub fn booked_day(&self) -> NaiveDate {
        booked_day(self.booking_date)
    }
}

/// Payload for creating a flight booking.
///
/// The customer and flight references are resolved by the store; only the
/// date is checked here.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
pub struct BookingRequest {
    pub customer_id: CustomerId,
    pub flight_id: FlightId,

    #[validate(custom(
        function = in_the_future,
        message = "booking date can not be in the past, please choose one from the future"
    ))]
    pub booking_date: DateTime<Utc>,
}

/// Truncates a booking instant to the UTC calendar day used by duplicate
/// detection. Time-of-day is ignored: two bookings whose UTC instants fall on
/// the same UTC day reserve the same slot.
pub fn booked_day(date: DateTime<Utc>) -> NaiveDate {
    date.date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::check;
    use chrono::{Duration, TimeZone};

    #[test]
    fn future_booking_request_passes() {
        let request = BookingRequest {
            customer_id: CustomerId::new(),
            flight_id: FlightId::new(),
            booking_date: Utc::now() + Duration::days(7),
        };
        assert!(check(&request).is_ok());
    }

    #[test]
    fn past_booking_request_is_rejected() {
        let request = BookingRequest {
            customer_id: CustomerId::new(),
            flight_id: FlightId::new(),
            booking_date: Utc::now() - Duration::hours(1),
        };
        let violations = check(&request).unwrap_err();
        assert!(violations.fields().contains_key("booking_date"));
    }

    #[test]
    fn same_day_different_times_truncate_equal() {
        let morning = Utc.with_ymd_and_hms(2999, 1, 1, 8, 30, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2999, 1, 1, 22, 15, 45).unwrap();
        assert_eq!(booked_day(morning), booked_day(evening));
    }

    #[test]
    fn adjacent_days_truncate_different() {
        let before_midnight = Utc.with_ymd_and_hms(2999, 1, 1, 23, 59, 59).unwrap();
        let after_midnight = Utc.with_ymd_and_hms(2999, 1, 2, 0, 0, 1).unwrap();
        assert_ne!(booked_day(before_midnight), booked_day(after_midnight));
    }

    #[test]
    fn booking_serialization_roundtrip() {
        let booking = Booking {
            id: BookingId::new(),
            customer_id: CustomerId::new(),
            flight_id: FlightId::new(),
            booking_date: Utc.with_ymd_and_hms(2999, 1, 1, 12, 0, 0).unwrap(),
        };
        let json = serde_json::to_string(&booking).unwrap();
        let deserialized: Booking = serde_json::from_str(&json).unwrap();
        assert_eq!(booking, deserialized);
    }
}
