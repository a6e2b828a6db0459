//! In-memory store implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{AgentBookingId, BookingId, CustomerId, FlightId};
use domain::{Booking, BookingRequest, Customer, Flight, TravelAgentBooking, booked_day, check};
use tokio::sync::RwLock;

use crate::store::{AgentBookingStore, BookingStore, Directory};
use crate::{Result, StoreError};

#[derive(Debug, Default)]
struct StoreState {
    customers: HashMap<CustomerId, Customer>,
    flights: HashMap<FlightId, Flight>,
    bookings: HashMap<BookingId, Booking>,
    // Insertion order doubles as listing order.
    agent_bookings: Vec<TravelAgentBooking>,
}

/// In-memory booking store.
///
/// Implements [`BookingStore`], [`Directory`] and [`AgentBookingStore`]
/// behind a single async `RwLock`, making every call atomic with respect to
/// the others. Customers and flights are reference data; `add_customer` /
/// `add_flight` are validated insert helpers for seeding.
#[derive(Clone, Default)]
pub struct InMemoryBookingStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryBookingStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and inserts a customer.
    pub async fn add_customer(&self, customer: Customer) -> Result<Customer> {
        check(&customer)?;
        let mut state = self.state.write().await;
        state.customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    /// Validates and inserts a flight. The flight number must be unique.
    pub async fn add_flight(&self, flight: Flight) -> Result<Flight> {
        check(&flight)?;
        let mut state = self.state.write().await;
        if state
            .flights
            .values()
            .any(|existing| existing.flight_no == flight.flight_no)
        {
            return Err(StoreError::DuplicateFlightNo(flight.flight_no));
        }
        state.flights.insert(flight.id, flight.clone());
        Ok(flight)
    }

    /// Returns the number of flight bookings held.
    pub async fn booking_count(&self) -> usize {
        self.state.read().await.bookings.len()
    }

    /// Returns the number of aggregate records held.
    pub async fn agent_booking_count(&self) -> usize {
        self.state.read().await.agent_bookings.len()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    #[tracing::instrument(skip(self, request), fields(customer = %request.customer_id, flight = %request.flight_id))]
    async fn create_booking(&self, request: BookingRequest) -> Result<Booking> {
        check(&request)?;

        let mut state = self.state.write().await;

        if !state.customers.contains_key(&request.customer_id) {
            return Err(StoreError::CustomerNotFound(request.customer_id));
        }
        if !state.flights.contains_key(&request.flight_id) {
            return Err(StoreError::FlightNotFound(request.flight_id));
        }

        let day = booked_day(request.booking_date);
        let taken = state
            .bookings
            .values()
            .any(|existing| existing.flight_id == request.flight_id && existing.booked_day() == day);
        if taken {
            return Err(StoreError::DuplicateBooking {
                flight_id: request.flight_id,
                day,
            });
        }

        let booking = Booking {
            id: BookingId::new(),
            customer_id: request.customer_id,
            flight_id: request.flight_id,
            booking_date: request.booking_date,
        };
        state.bookings.insert(booking.id, booking.clone());
        tracing::debug!(booking = %booking.id, "flight booking created");
        Ok(booking)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_booking(&self, id: BookingId) -> Result<()> {
        let mut state = self.state.write().await;
        state
            .bookings
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::BookingNotFound(id))
    }

    async fn booking_by_id(&self, id: BookingId) -> Result<Option<Booking>> {
        Ok(self.state.read().await.bookings.get(&id).cloned())
    }

    async fn bookings_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Booking>> {
        let state = self.state.read().await;
        let mut bookings: Vec<_> = state
            .bookings
            .values()
            .filter(|booking| booking.customer_id == customer_id)
            .cloned()
            .collect();
        bookings.sort_by_key(|booking| booking.booking_date);
        Ok(bookings)
    }

    async fn bookings_by_flight(&self, flight_id: FlightId) -> Result<Vec<Booking>> {
        let state = self.state.read().await;
        let mut bookings: Vec<_> = state
            .bookings
            .values()
            .filter(|booking| booking.flight_id == flight_id)
            .cloned()
            .collect();
        bookings.sort_by_key(|booking| booking.booking_date);
        Ok(bookings)
    }
}

#[async_trait]
impl Directory for InMemoryBookingStore {
    async fn customer_by_id(&self, id: CustomerId) -> Result<Option<Customer>> {
        Ok(self.state.read().await.customers.get(&id).cloned())
    }

    async fn flight_by_id(&self, id: FlightId) -> Result<Option<Flight>> {
        Ok(self.state.read().await.flights.get(&id).cloned())
    }
}

#[async_trait]
impl AgentBookingStore for InMemoryBookingStore {
    #[tracing::instrument(skip(self, booking), fields(agent_booking = %booking.id))]
    async fn create_agent_booking(
        &self,
        booking: TravelAgentBooking,
    ) -> Result<TravelAgentBooking> {
        let mut state = self.state.write().await;
        state.agent_bookings.push(booking.clone());
        Ok(booking)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_agent_booking(&self, id: AgentBookingId) -> Result<()> {
        let mut state = self.state.write().await;
        let position = state
            .agent_bookings
            .iter()
            .position(|booking| booking.id == id)
            .ok_or(StoreError::AgentBookingNotFound(id))?;
        state.agent_bookings.remove(position);
        Ok(())
    }

    async fn agent_booking_by_id(&self, id: AgentBookingId) -> Result<Option<TravelAgentBooking>> {
        let state = self.state.read().await;
        Ok(state
            .agent_bookings
            .iter()
            .find(|booking| booking.id == id)
            .cloned())
    }

    async fn all_agent_bookings(&self) -> Result<Vec<TravelAgentBooking>> {
        Ok(self.state.read().await.agent_bookings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use domain::{HotelBooking, TaxiBooking};

    async fn seeded_store() -> (InMemoryBookingStore, Customer, Flight) {
        let store = InMemoryBookingStore::new();
        let customer = store
            .add_customer(Customer::new(
                "Jane Doe",
                "jane.doe@example.com",
                "0791574891",
            ))
            .await
            .unwrap();
        let flight = store
            .add_flight(Flight::new(
                "SC8888",
                "Newcastle",
                "London",
                "36A",
                Utc::now() + Duration::days(60),
            ))
            .await
            .unwrap();
        (store, customer, flight)
    }

    fn request(customer: &Customer, flight: &Flight, days_ahead: i64) -> BookingRequest {
        BookingRequest {
            customer_id: customer.id,
            flight_id: flight.id,
            booking_date: Utc::now() + Duration::days(days_ahead),
        }
    }

    #[tokio::test]
    async fn create_and_find_booking() {
        let (store, customer, flight) = seeded_store().await;
        let req = request(&customer, &flight, 30);

        let booking = store.create_booking(req.clone()).await.unwrap();
        let found = store.booking_by_id(booking.id).await.unwrap().unwrap();

        assert_eq!(found.customer_id, req.customer_id);
        assert_eq!(found.flight_id, req.flight_id);
        assert_eq!(found.booking_date, req.booking_date);
    }

    #[tokio::test]
    async fn duplicate_same_day_is_rejected() {
        use chrono::TimeZone;

        let (store, customer, flight) = seeded_store().await;
        let first = BookingRequest {
            customer_id: customer.id,
            flight_id: flight.id,
            booking_date: Utc.with_ymd_and_hms(2999, 1, 1, 8, 30, 0).unwrap(),
        };
        store.create_booking(first.clone()).await.unwrap();

        // Same UTC day, different time-of-day.
        let second = BookingRequest {
            booking_date: Utc.with_ymd_and_hms(2999, 1, 1, 22, 15, 0).unwrap(),
            ..first
        };
        let err = store.create_booking(second).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateBooking { .. }));
        assert_eq!(store.booking_count().await, 1);
    }

    #[tokio::test]
    async fn different_day_same_flight_is_allowed() {
        let (store, customer, flight) = seeded_store().await;
        store
            .create_booking(request(&customer, &flight, 30))
            .await
            .unwrap();
        store
            .create_booking(request(&customer, &flight, 31))
            .await
            .unwrap();
        assert_eq!(store.booking_count().await, 2);
    }

    #[tokio::test]
    async fn past_booking_date_is_rejected() {
        let (store, customer, flight) = seeded_store().await;
        let req = BookingRequest {
            customer_id: customer.id,
            flight_id: flight.id,
            booking_date: Utc::now() - Duration::days(1),
        };
        let err = store.create_booking(req).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_customer_is_rejected() {
        let (store, _, flight) = seeded_store().await;
        let req = BookingRequest {
            customer_id: CustomerId::new(),
            flight_id: flight.id,
            booking_date: Utc::now() + Duration::days(30),
        };
        let err = store.create_booking(req).await.unwrap_err();
        assert!(matches!(err, StoreError::CustomerNotFound(_)));
    }

    #[tokio::test]
    async fn unknown_flight_is_rejected() {
        let (store, customer, _) = seeded_store().await;
        let req = BookingRequest {
            customer_id: customer.id,
            flight_id: FlightId::new(),
            booking_date: Utc::now() + Duration::days(30),
        };
        let err = store.create_booking(req).await.unwrap_err();
        assert!(matches!(err, StoreError::FlightNotFound(_)));
    }

    #[tokio::test]
    async fn delete_booking_removes_it() {
        let (store, customer, flight) = seeded_store().await;
        let booking = store
            .create_booking(request(&customer, &flight, 30))
            .await
            .unwrap();

        store.delete_booking(booking.id).await.unwrap();
        assert!(store.booking_by_id(booking.id).await.unwrap().is_none());

        let err = store.delete_booking(booking.id).await.unwrap_err();
        assert!(matches!(err, StoreError::BookingNotFound(_)));
    }

    #[tokio::test]
    async fn bookings_by_flight_filters() {
        let (store, customer, flight) = seeded_store().await;
        let other = store
            .add_flight(Flight::new(
                "BA1234",
                "Paris",
                "Rome",
                "12C",
                Utc::now() + Duration::days(60),
            ))
            .await
            .unwrap();

        store
            .create_booking(request(&customer, &flight, 30))
            .await
            .unwrap();
        store
            .create_booking(request(&customer, &other, 30))
            .await
            .unwrap();

        let for_flight = store.bookings_by_flight(flight.id).await.unwrap();
        assert_eq!(for_flight.len(), 1);
        assert_eq!(for_flight[0].flight_id, flight.id);

        let for_customer = store.bookings_by_customer(customer.id).await.unwrap();
        assert_eq!(for_customer.len(), 2);
    }

    #[tokio::test]
    async fn duplicate_flight_no_is_rejected() {
        let (store, _, _) = seeded_store().await;
        let err = store
            .add_flight(Flight::new(
                "SC8888",
                "Paris",
                "Rome",
                "01A",
                Utc::now() + Duration::days(60),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateFlightNo(_)));
    }

    #[tokio::test]
    async fn agent_booking_lifecycle() {
        let (store, customer, flight) = seeded_store().await;
        let booking = store
            .create_booking(request(&customer, &flight, 30))
            .await
            .unwrap();
        let date = booking.booking_date;

        let aggregate = TravelAgentBooking::assemble(
            booking,
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
        let id = aggregate.id;

        store.create_agent_booking(aggregate).await.unwrap();
        assert!(store.agent_booking_by_id(id).await.unwrap().is_some());
        assert_eq!(store.all_agent_bookings().await.unwrap().len(), 1);

        store.delete_agent_booking(id).await.unwrap();
        assert!(store.agent_booking_by_id(id).await.unwrap().is_none());

        let err = store.delete_agent_booking(id).await.unwrap_err();
        assert!(matches!(err, StoreError::AgentBookingNotFound(_)));
    }
}
