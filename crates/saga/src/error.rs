//! Saga error types.

use booking_store::StoreError;
use common::AgentBookingId;
use serde::Serialize;
use thiserror::Error;

use crate::services::RemoteError;

/// A compensation or release action that failed, leaving the named resource
/// behind in a remote system (or the local store) for manual reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseFailure {
    /// Which system holds the stranded resource.
    pub service: &'static str,
    /// The id of the resource that could not be released.
    pub reference: String,
    /// Why the release failed.
    pub reason: String,
}

impl std::fmt::Display for ReleaseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.service, self.reference, self.reason)
    }
}

/// A reservation that was successfully released during compensation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleasedReservation {
    pub service: &'static str,
    pub reference: String,
}

/// Errors that can occur while orchestrating a travel agent booking.
#[derive(Debug, Error)]
pub enum SagaError {
    /// The local store rejected an operation (validation, duplicate booking,
    /// missing reference). Detected before any remote call is made.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A remote reservation service failed. Any earlier steps were
    /// compensated before this surfaced.
    #[error("{service} service error: {source}")]
    Remote {
        service: &'static str,
        #[source]
        source: RemoteError,
    },

    /// The travel agent aggregate record does not exist.
    #[error("agent booking {0} not found")]
    AgentBookingNotFound(AgentBookingId),

    /// A step failed and at least one compensating action failed too.
    ///
    /// This is distinct from the triggering failure: the listed resources
    /// are stranded and need out-of-band reconciliation.
    #[error("compensation failed after '{failed_step}' ({cause}): {}", format_failures(.failures))]
    CompensationFailed {
        /// The step whose failure triggered compensation.
        failed_step: &'static str,
        /// The error that triggered compensation.
        cause: String,
        /// Compensations that failed, one per stranded resource.
        failures: Vec<ReleaseFailure>,
    },

    /// The local aggregate record was deleted but one or both remote
    /// reservations could not be released.
    #[error("agent booking {id} cancelled but remote release failed: {}", format_failures(.failures))]
    ReleaseFailed {
        id: AgentBookingId,
        /// Releases that went through.
        released: Vec<ReleasedReservation>,
        /// Releases that failed, one per orphaned reservation.
        failures: Vec<ReleaseFailure>,
    },
}

fn format_failures(failures: &[ReleaseFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenience type alias for saga results.
pub type Result<T> = std::result::Result<T, SagaError>;
