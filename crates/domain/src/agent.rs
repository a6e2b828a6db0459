//! Travel agent aggregate and the remote reservation value records.

use chrono::{DateTime, Utc};
use common::AgentBookingId;
use serde::{Deserialize, Serialize};

use crate::booking::Booking;

/// A taxi reservation held by the remote taxi system.
///
/// The `id` is assigned by that system and is the handle used to release the
/// reservation; this core never controls the reservation's lifecycle beyond
/// asking for its deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxiBooking {
    pub id: String,
    pub taxi_id: u64,
    pub booking_date: DateTime<Utc>,
}

/// A hotel reservation held by the remote hotel system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelBooking {
    pub id: String,
    pub hotel_id: u64,
    pub booking_date: DateTime<Utc>,
}

/// The aggregate record linking one flight booking with one taxi and one
/// hotel reservation.
///
/// Created only after all three constituent reservations succeeded; deleting
/// it removes the local record and asks both remote systems to release their
/// reservations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelAgentBooking {
    pub id: AgentBookingId,
    pub taxi_booking: TaxiBooking,
    pub hotel_booking: HotelBooking,
    pub flight_booking: Booking,
    pub agent_booking_date: DateTime<Utc>,
}

impl TravelAgentBooking {
    /// Assembles the aggregate from its three constituent reservations.
    ///
    /// The agent booking date mirrors the flight booking's date.
    pub fn assemble(
        flight_booking: Booking,
        taxi_booking: TaxiBooking,
        hotel_booking: HotelBooking,
    ) -> Self {
        let agent_booking_date = flight_booking.booking_date;
        Self {
            id: AgentBookingId::new(),
            taxi_booking,
            hotel_booking,
            flight_booking,
            agent_booking_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{BookingId, CustomerId, FlightId};
    use chrono::TimeZone;

    fn sample_booking(date: DateTime<Utc>) -> Booking {
        Booking {
            id: BookingId::new(),
            customer_id: CustomerId::new(),
            flight_id: FlightId::new(),
            booking_date: date,
        }
    }

    #[test]
    fn assemble_mirrors_flight_booking_date() {
        let date = Utc.with_ymd_and_hms(2999, 1, 1, 9, 0, 0).unwrap();
        let aggregate = TravelAgentBooking::assemble(
            sample_booking(date),
            TaxiBooking {
                id: "TAXI-0001".to_string(),
                taxi_id: 1,
                booking_date: date,
            },
            HotelBooking {
                id: "HOTEL-0001".to_string(),
                hotel_id: 1,
                booking_date: date,
            },
        );
        assert_eq!(aggregate.agent_booking_date, date);
        assert_eq!(aggregate.flight_booking.booking_date, date);
    }

    #[test]
    fn assemble_assigns_unique_ids() {
        let date = Utc.with_ymd_and_hms(2999, 1, 1, 9, 0, 0).unwrap();
        let make = || {
            TravelAgentBooking::assemble(
                sample_booking(date),
                TaxiBooking {
                    id: "TAXI-0001".to_string(),
                    taxi_id: 1,
                    booking_date: date,
                },
                HotelBooking {
                    id: "HOTEL-0001".to_string(),
                    hotel_id: 1,
                    booking_date: date,
                },
            )
        };
        assert_ne!(make().id, make().id);
    }

    #[test]
    fn aggregate_serialization_roundtrip() {
        let date = Utc.with_ymd_and_hms(2999, 1, 1, 9, 0, 0).unwrap();
        let aggregate = TravelAgentBooking::assemble(
            sample_booking(date),
            TaxiBooking {
                id: "TAXI-0007".to_string(),
                taxi_id: 7,
                booking_date: date,
            },
            HotelBooking {
                id: "HOTEL-0003".to_string(),
                hotel_id: 3,
                booking_date: date,
            },
        );
        let json = serde_json::to_string(&aggregate).unwrap();
        let deserialized: TravelAgentBooking = serde_json::from_str(&json).unwrap();
        assert_eq!(aggregate, deserialized);
    }
}
