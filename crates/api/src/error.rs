//! API error types with HTTP response mapping.
//!
//! Every failure maps to a JSON body of the form
//! `{"category": …, "violations"|"reasons": {field → message}}` with a stable
//! category. Remote and unexpected failures never leak upstream bodies or
//! stack traces beyond the sanitized reason strings.

use std::collections::BTreeMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use booking_store::StoreError;
use saga::{RemoteError, SagaError};

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request (unparsable id, bad payload).
    BadRequest(String),
    /// Orchestration error.
    Saga(SagaError),
}

impl From<SagaError> for ApiError {
    fn from(err: SagaError) -> Self {
        ApiError::Saga(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => reasons_response(
                StatusCode::BAD_REQUEST,
                "validation",
                [("request".to_string(), message)].into(),
            ),
            ApiError::Saga(err) => saga_error_response(err),
        }
    }
}

fn saga_error_response(err: SagaError) -> Response {
    match err {
        SagaError::Store(StoreError::Validation(violations)) => {
            let body = serde_json::json!({
                "category": "validation",
                "violations": violations.fields(),
            });
            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        }
        SagaError::Store(StoreError::DuplicateBooking { .. })
        | SagaError::Store(StoreError::DuplicateFlightNo(_)) => reasons_response(
            StatusCode::CONFLICT,
            "conflict",
            [("booking".to_string(), err.to_string())].into(),
        ),
        SagaError::Store(StoreError::CustomerNotFound(id)) => {
            not_found("customer_id", id.to_string())
        }
        SagaError::Store(StoreError::FlightNotFound(id)) => not_found("flight_id", id.to_string()),
        SagaError::Store(StoreError::BookingNotFound(id)) => {
            not_found("booking_id", id.to_string())
        }
        SagaError::Store(StoreError::AgentBookingNotFound(id))
        | SagaError::AgentBookingNotFound(id) => not_found("agent_booking_id", id.to_string()),
        SagaError::Remote {
            service,
            source: RemoteError::NotFound(reference),
        } => not_found(service, format!("{reference} not found")),
        SagaError::Remote {
            service,
            source: source @ RemoteError::Rejected(_),
        } => reasons_response(
            StatusCode::CONFLICT,
            "conflict",
            [(service.to_string(), source.to_string())].into(),
        ),
        SagaError::Remote { service, source } => {
            tracing::error!(service, error = %source, "remote service failure");
            reasons_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "remote_failure",
                [(service.to_string(), source.to_string())].into(),
            )
        }
        SagaError::CompensationFailed {
            failed_step,
            cause,
            failures,
        } => {
            tracing::error!(failed_step, %cause, "compensation failed, resources stranded");
            let mut reasons: BTreeMap<String, String> = failures
                .iter()
                .map(|f| (format!("{}/{}", f.service, f.reference), f.reason.clone()))
                .collect();
            reasons.insert("cause".to_string(), cause);
            reasons_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "compensation_failure",
                reasons,
            )
        }
        SagaError::ReleaseFailed {
            id,
            released,
            failures,
        } => {
            tracing::error!(agent_booking = %id, "cancellation left orphaned reservations");
            let reasons: BTreeMap<String, String> = failures
                .iter()
                .map(|f| (format!("{}/{}", f.service, f.reference), f.reason.clone()))
                .collect();
            let body = serde_json::json!({
                "category": "compensation_failure",
                "reasons": reasons,
                "released": released,
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

fn not_found(field: &str, message: String) -> Response {
    reasons_response(
        StatusCode::NOT_FOUND,
        "not_found",
        [(field.to_string(), message)].into(),
    )
}

fn reasons_response(
    status: StatusCode,
    category: &'static str,
    reasons: BTreeMap<String, String>,
) -> Response {
    let body = serde_json::json!({
        "category": category,
        "reasons": reasons,
    });
    (status, Json(body)).into_response()
}
