//! HTTP API server for the travel agent booking system.
//!
//! Exposes the travel agent orchestration over REST, with structured logging
//! (tracing) and Prometheus metrics:
//! - `POST /bookings` — book a trip (flight booking + taxi + hotel)
//! - `GET /bookings` — list all travel agent bookings
//! - `DELETE /bookings/{id}` — cancel a travel agent booking
//! - `GET /health`, `GET /metrics`

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use booking_store::InMemoryBookingStore;
use metrics_exporter_prometheus::PrometheusHandle;
use saga::{ReservationClient, TravelAgentCoordinator};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::agent_bookings::AppState;

/// Creates the application state around the store and the two remote
/// reservation clients.
pub fn create_state<T, H>(
    store: InMemoryBookingStore,
    taxi: T,
    hotel: H,
) -> Arc<AppState<T, H>>
where
    T: ReservationClient,
    H: ReservationClient,
{
    let coordinator = TravelAgentCoordinator::new(store, taxi, hotel);
    Arc::new(AppState { coordinator })
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<T, H>(state: Arc<AppState<T, H>>, metrics_handle: PrometheusHandle) -> Router
where
    T: ReservationClient + 'static,
    H: ReservationClient + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/bookings", post(routes::agent_bookings::create::<T, H>))
        .route("/bookings", get(routes::agent_bookings::list::<T, H>))
        .route(
            "/bookings/{id}",
            delete(routes::agent_bookings::delete::<T, H>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
