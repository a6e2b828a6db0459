//! Travel agent booking endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use booking_store::InMemoryBookingStore;
use chrono::{DateTime, Utc};
use common::{AgentBookingId, CustomerId, FlightId};
use domain::TravelAgentBooking;
use saga::{ReservationClient, TravelAgentCoordinator, TravelBookingRequest};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<T: ReservationClient, H: ReservationClient> {
    pub coordinator: TravelAgentCoordinator<InMemoryBookingStore, T, H>,
}

// -- Request types --

#[derive(Deserialize)]
pub struct CreateAgentBookingRequest {
    pub customer_id: uuid::Uuid,
    pub flight_id: uuid::Uuid,
    pub booking_date: DateTime<Utc>,
    pub taxi_id: u64,
    pub hotel_id: u64,
}

// -- Response types --

#[derive(Serialize)]
pub struct AgentBookingResponse {
    pub id: String,
    pub agent_booking_date: DateTime<Utc>,
    pub flight_booking: FlightBookingResponse,
    pub taxi_booking: RemoteBookingResponse,
    pub hotel_booking: RemoteBookingResponse,
}

#[derive(Serialize)]
pub struct FlightBookingResponse {
    pub id: String,
    pub customer_id: String,
    pub flight_id: String,
    pub booking_date: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct RemoteBookingResponse {
    pub id: String,
    pub resource_id: u64,
    pub booking_date: DateTime<Utc>,
}

impl From<TravelAgentBooking> for AgentBookingResponse {
    fn from(booking: TravelAgentBooking) -> Self {
        Self {
            id: booking.id.to_string(),
            agent_booking_date: booking.agent_booking_date,
            flight_booking: FlightBookingResponse {
                id: booking.flight_booking.id.to_string(),
                customer_id: booking.flight_booking.customer_id.to_string(),
                flight_id: booking.flight_booking.flight_id.to_string(),
                booking_date: booking.flight_booking.booking_date,
            },
            taxi_booking: RemoteBookingResponse {
                id: booking.taxi_booking.id,
                resource_id: booking.taxi_booking.taxi_id,
                booking_date: booking.taxi_booking.booking_date,
            },
            hotel_booking: RemoteBookingResponse {
                id: booking.hotel_booking.id,
                resource_id: booking.hotel_booking.hotel_id,
                booking_date: booking.hotel_booking.booking_date,
            },
        }
    }
}

// -- Handlers --

/// POST /bookings — book a complete trip.
#[tracing::instrument(skip(state, req))]
pub async fn create<T: ReservationClient + 'static, H: ReservationClient + 'static>(
    State(state): State<Arc<AppState<T, H>>>,
    Json(req): Json<CreateAgentBookingRequest>,
) -> Result<(StatusCode, Json<AgentBookingResponse>), ApiError> {
    let request = TravelBookingRequest {
        customer_id: CustomerId::from_uuid(req.customer_id),
        flight_id: FlightId::from_uuid(req.flight_id),
        booking_date: req.booking_date,
        taxi_id: req.taxi_id,
        hotel_id: req.hotel_id,
    };

    let booking = state.coordinator.book(request).await?;
    Ok((StatusCode::CREATED, Json(booking.into())))
}

/// GET /bookings — list all travel agent bookings.
#[tracing::instrument(skip(state))]
pub async fn list<T: ReservationClient + 'static, H: ReservationClient + 'static>(
    State(state): State<Arc<AppState<T, H>>>,
) -> Result<Json<Vec<AgentBookingResponse>>, ApiError> {
    let bookings = state.coordinator.all_bookings().await?;
    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

/// DELETE /bookings/{id} — cancel a travel agent booking.
#[tracing::instrument(skip(state))]
pub async fn delete<T: ReservationClient + 'static, H: ReservationClient + 'static>(
    State(state): State<Arc<AppState<T, H>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_agent_booking_id(&id)?;
    state.coordinator.cancel(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_agent_booking_id(id: &str) -> Result<AgentBookingId, ApiError> {
    let uuid = uuid::Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("invalid booking id: {e}")))?;
    Ok(AgentBookingId::from_uuid(uuid))
}
