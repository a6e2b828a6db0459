//! Remote reservation service abstraction.
//!
//! The taxi and hotel backends expose the same three operations; each is
//! modeled as a [`ReservationClient`] so the coordinator never assumes they
//! share a transaction with the local store, and so tests can substitute the
//! network with [`InMemoryReservationService`].

pub mod http;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::Customer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use http::HttpReservationClient;
pub use memory::InMemoryReservationService;

/// Customer contact details forwarded to a remote reservation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone_number: String,
}

impl From<&Customer> for CustomerInfo {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone_number: customer.phone_number.clone(),
        }
    }
}

/// A bookable resource (a taxi or a hotel) owned by a remote system.
///
/// Only the id matters to the orchestrator; resolving it confirms the
/// resource exists before a reservation is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: u64,
}

/// Request to reserve a resource on behalf of a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub customer: CustomerInfo,
    pub resource_id: u64,
    pub booking_date: DateTime<Utc>,
}

/// A reservation held by a remote system.
///
/// The `id` is assigned by that system and is the only handle for deleting
/// the reservation later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub resource_id: u64,
    pub booking_date: DateTime<Utc>,
}

/// Errors surfaced by a remote reservation service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The resource or reservation does not exist on the remote side.
    #[error("not found: {0}")]
    NotFound(String),

    /// The remote service refused the request (validation, conflict).
    #[error("reservation rejected: {0}")]
    Rejected(String),

    /// The remote service could not be reached, timed out, or failed
    /// internally.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// A remote reservation backend (taxi or hotel).
#[async_trait]
pub trait ReservationClient: Send + Sync {
    /// A short label for this backend, used in errors, logs and metrics.
    fn service_name(&self) -> &'static str;

    /// Resolves a resource by id, confirming it exists.
    async fn get_resource(&self, id: u64) -> Result<Resource, RemoteError>;

    /// Creates a reservation for the resource.
    async fn create_reservation(
        &self,
        request: &ReservationRequest,
    ) -> Result<Reservation, RemoteError>;

    /// Deletes a reservation by the id the remote system assigned.
    async fn delete_reservation(&self, reservation_id: &str) -> Result<(), RemoteError>;
}
