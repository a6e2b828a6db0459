//! Travel agent coordinator for orchestrating trip bookings.

use booking_store::{AgentBookingStore, BookingStore, Directory, StoreError};
use chrono::{DateTime, Utc};
use common::{AgentBookingId, CustomerId, FlightId};
use domain::{BookingRequest, HotelBooking, TaxiBooking, TravelAgentBooking};

use crate::error::{ReleaseFailure, ReleasedReservation, Result, SagaError};
use crate::services::{CustomerInfo, Reservation, ReservationClient, ReservationRequest};
use crate::steps::{self, CompletedStep};

/// A request to book a complete trip: a flight booking plus the taxi and
/// hotel resources to reserve for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelBookingRequest {
    pub customer_id: CustomerId,
    pub flight_id: FlightId,
    pub booking_date: DateTime<Utc>,
    pub taxi_id: u64,
    pub hotel_id: u64,
}

impl TravelBookingRequest {
    fn booking_request(&self) -> BookingRequest {
        BookingRequest {
            customer_id: self.customer_id,
            flight_id: self.flight_id,
            booking_date: self.booking_date,
        }
    }
}

/// Orchestrates travel agent bookings across the local store and the two
/// remote reservation services.
///
/// The three systems share no transaction, so `book` runs as a saga: each
/// successful step is pushed onto a compensation log, and any later failure
/// unwinds the log in reverse order before the error is surfaced.
pub struct TravelAgentCoordinator<S, T, H>
where
    S: BookingStore + Directory + AgentBookingStore,
    T: ReservationClient,
    H: ReservationClient,
{
    store: S,
    taxi: T,
    hotel: H,
}

impl<S, T, H> TravelAgentCoordinator<S, T, H>
where
    S: BookingStore + Directory + AgentBookingStore,
    T: ReservationClient,
    H: ReservationClient,
{
    /// Creates a new coordinator over the given collaborators.
    pub fn new(store: S, taxi: T, hotel: H) -> Self {
        Self { store, taxi, hotel }
    }

    /// Books a complete trip.
    ///
    /// On success exactly one flight booking, one taxi reservation, one hotel
    /// reservation and one aggregate record exist, all sharing the booking
    /// date. On failure no partial state survives unless a compensation
    /// itself failed, which surfaces as [`SagaError::CompensationFailed`].
    #[tracing::instrument(
        skip(self, request),
        fields(customer = %request.customer_id, flight = %request.flight_id)
    )]
    pub async fn book(&self, request: TravelBookingRequest) -> Result<TravelAgentBooking> {
        metrics::counter!("agent_bookings_total").increment(1);
        let start = std::time::Instant::now();
        let mut completed: Vec<CompletedStep> = Vec::new();

        // The customer's contact details travel to both remote services.
        // Resolved up front so a dangling reference aborts before any state
        // is created anywhere.
        let customer = self
            .store
            .customer_by_id(request.customer_id)
            .await?
            .ok_or(StoreError::CustomerNotFound(request.customer_id))?;
        let customer_info = CustomerInfo::from(&customer);

        // Step 1: flight booking. Validation, reference and duplicate
        // failures abort here, before any remote call.
        let booking = self.store.create_booking(request.booking_request()).await?;
        tracing::info!(step = steps::STEP_BOOK_FLIGHT, booking = %booking.id, "step completed");
        completed.push(CompletedStep::FlightBooked(booking.id));

        // Step 2: taxi reservation.
        let taxi_reservation = match self
            .reserve(&self.taxi, request.taxi_id, &customer_info, booking.booking_date)
            .await
        {
            Ok(reservation) => reservation,
            Err(cause) => {
                return Err(self
                    .unwind(steps::STEP_RESERVE_TAXI, cause, &completed)
                    .await);
            }
        };
        tracing::info!(
            step = steps::STEP_RESERVE_TAXI,
            reservation = %taxi_reservation.id,
            "step completed"
        );
        completed.push(CompletedStep::TaxiReserved(taxi_reservation.id.clone()));

        // Step 3: hotel reservation.
        let hotel_reservation = match self
            .reserve(
                &self.hotel,
                request.hotel_id,
                &customer_info,
                booking.booking_date,
            )
            .await
        {
            Ok(reservation) => reservation,
            Err(cause) => {
                return Err(self
                    .unwind(steps::STEP_RESERVE_HOTEL, cause, &completed)
                    .await);
            }
        };
        tracing::info!(
            step = steps::STEP_RESERVE_HOTEL,
            reservation = %hotel_reservation.id,
            "step completed"
        );
        completed.push(CompletedStep::HotelReserved(hotel_reservation.id.clone()));

        // Step 4: persist the aggregate linking all three.
        let aggregate = TravelAgentBooking::assemble(
            booking,
            TaxiBooking {
                id: taxi_reservation.id,
                taxi_id: taxi_reservation.resource_id,
                booking_date: taxi_reservation.booking_date,
            },
            HotelBooking {
                id: hotel_reservation.id,
                hotel_id: hotel_reservation.resource_id,
                booking_date: hotel_reservation.booking_date,
            },
        );
        let aggregate = match self.store.create_agent_booking(aggregate).await {
            Ok(aggregate) => aggregate,
            Err(e) => {
                return Err(self
                    .unwind(steps::STEP_RECORD_AGENT_BOOKING, e.into(), &completed)
                    .await);
            }
        };

        let duration = start.elapsed().as_secs_f64();
        metrics::histogram!("agent_booking_duration_seconds").record(duration);
        metrics::counter!("agent_bookings_completed").increment(1);
        tracing::info!(agent_booking = %aggregate.id, duration, "travel agent booking completed");

        Ok(aggregate)
    }

    /// Cancels a travel agent booking.
    ///
    /// Deletes the local aggregate record, then asks both remote services to
    /// release their reservations. Both releases are attempted even if the
    /// first fails; failures are reported per reservation via
    /// [`SagaError::ReleaseFailed`] since the local record is already gone.
    #[tracing::instrument(skip(self))]
    pub async fn cancel(&self, id: AgentBookingId) -> Result<()> {
        metrics::counter!("agent_booking_cancellations_total").increment(1);

        let record = self
            .store
            .agent_booking_by_id(id)
            .await?
            .ok_or(SagaError::AgentBookingNotFound(id))?;
        self.store.delete_agent_booking(id).await?;

        let mut released = Vec::new();
        let mut failures = Vec::new();
        let targets: [(&dyn ReservationClient, &str); 2] = [
            (&self.taxi, record.taxi_booking.id.as_str()),
            (&self.hotel, record.hotel_booking.id.as_str()),
        ];
        for (client, reservation_id) in targets {
            match client.delete_reservation(reservation_id).await {
                Ok(()) => {
                    tracing::info!(
                        service = client.service_name(),
                        reservation = reservation_id,
                        "reservation released"
                    );
                    released.push(ReleasedReservation {
                        service: client.service_name(),
                        reference: reservation_id.to_string(),
                    });
                }
                Err(e) => {
                    tracing::error!(
                        service = client.service_name(),
                        reservation = reservation_id,
                        error = %e,
                        "release failed, reservation orphaned"
                    );
                    failures.push(ReleaseFailure {
                        service: client.service_name(),
                        reference: reservation_id.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if failures.is_empty() {
            tracing::info!(agent_booking = %id, "travel agent booking cancelled");
            Ok(())
        } else {
            metrics::counter!("agent_booking_release_failures_total").increment(1);
            Err(SagaError::ReleaseFailed {
                id,
                released,
                failures,
            })
        }
    }

    /// Looks up an aggregate booking by id.
    pub async fn agent_booking(&self, id: AgentBookingId) -> Result<Option<TravelAgentBooking>> {
        Ok(self.store.agent_booking_by_id(id).await?)
    }

    /// Returns all aggregate bookings.
    pub async fn all_bookings(&self) -> Result<Vec<TravelAgentBooking>> {
        Ok(self.store.all_agent_bookings().await?)
    }

    /// Resolves the resource, then submits a reservation carrying the
    /// customer's contact details and the booking date.
    async fn reserve<C: ReservationClient>(
        &self,
        client: &C,
        resource_id: u64,
        customer: &CustomerInfo,
        booking_date: DateTime<Utc>,
    ) -> Result<Reservation> {
        let resource = client
            .get_resource(resource_id)
            .await
            .map_err(|source| SagaError::Remote {
                service: client.service_name(),
                source,
            })?;

        let request = ReservationRequest {
            customer: customer.clone(),
            resource_id: resource.id,
            booking_date,
        };
        client
            .create_reservation(&request)
            .await
            .map_err(|source| SagaError::Remote {
                service: client.service_name(),
                source,
            })
    }

    /// Unwinds completed steps in reverse order after `failed_step` failed.
    ///
    /// Returns the error to surface: the original cause when every
    /// compensation succeeded, [`SagaError::CompensationFailed`] listing each
    /// stranded resource otherwise.
    async fn unwind(
        &self,
        failed_step: &'static str,
        cause: SagaError,
        completed: &[CompletedStep],
    ) -> SagaError {
        metrics::counter!("agent_booking_compensations_total").increment(1);
        tracing::warn!(step = failed_step, error = %cause, "booking step failed, compensating");

        let mut failures = Vec::new();
        for step in completed.iter().rev() {
            let result = match step {
                CompletedStep::FlightBooked(id) => self
                    .store
                    .delete_booking(*id)
                    .await
                    .map_err(|e| e.to_string()),
                CompletedStep::TaxiReserved(id) => self
                    .taxi
                    .delete_reservation(id)
                    .await
                    .map_err(|e| e.to_string()),
                CompletedStep::HotelReserved(id) => self
                    .hotel
                    .delete_reservation(id)
                    .await
                    .map_err(|e| e.to_string()),
            };
            match result {
                Ok(()) => {
                    tracing::info!(
                        step = step.step_name(),
                        reference = %step.reference(),
                        "compensated"
                    );
                }
                Err(reason) => {
                    tracing::error!(
                        step = step.step_name(),
                        reference = %step.reference(),
                        %reason,
                        "compensation failed, resource stranded"
                    );
                    failures.push(ReleaseFailure {
                        service: step.service(),
                        reference: step.reference(),
                        reason,
                    });
                }
            }
        }

        metrics::counter!("agent_bookings_failed").increment(1);
        if failures.is_empty() {
            cause
        } else {
            metrics::counter!("agent_booking_compensation_failures_total").increment(1);
            SagaError::CompensationFailed {
                failed_step,
                cause: cause.to_string(),
                failures,
            }
        }
    }
}
