//! In-memory reservation service for testing.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::{RemoteError, Reservation, ReservationClient, ReservationRequest, Resource};

#[derive(Debug, Default)]
struct ServiceState {
    resources: HashSet<u64>,
    reservations: HashMap<String, Reservation>,
    next_id: u32,
    fail_on_create: bool,
    fail_on_delete: bool,
    lookup_calls: u32,
    create_calls: u32,
    delete_calls: u32,
}

/// In-memory [`ReservationClient`] double.
///
/// Clones share state, so a test can keep a handle for assertions after
/// moving the service into the coordinator. Failure toggles simulate an
/// unreachable backend; call counters let tests assert that no remote call
/// was made (or exactly one was).
#[derive(Debug, Clone)]
pub struct InMemoryReservationService {
    service: &'static str,
    prefix: String,
    state: Arc<RwLock<ServiceState>>,
}

impl InMemoryReservationService {
    /// Creates a double for the given backend label ("taxi", "hotel").
    pub fn new(service: &'static str) -> Self {
        Self {
            service,
            prefix: service.to_uppercase(),
            state: Arc::new(RwLock::new(ServiceState::default())),
        }
    }

    /// Creates a taxi service double.
    pub fn taxi() -> Self {
        Self::new("taxi")
    }

    /// Creates a hotel service double.
    pub fn hotel() -> Self {
        Self::new("hotel")
    }

    /// Registers a bookable resource.
    pub fn add_resource(&self, id: u64) {
        self.state.write().unwrap().resources.insert(id);
    }

    /// Configures the service to fail reservation creation.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create = fail;
    }

    /// Configures the service to fail reservation deletion.
    pub fn set_fail_on_delete(&self, fail: bool) {
        self.state.write().unwrap().fail_on_delete = fail;
    }

    /// Returns the number of reservations currently held.
    pub fn reservation_count(&self) -> usize {
        self.state.read().unwrap().reservations.len()
    }

    /// Returns true if a reservation exists with the given ID.
    pub fn has_reservation(&self, reservation_id: &str) -> bool {
        self.state
            .read()
            .unwrap()
            .reservations
            .contains_key(reservation_id)
    }

    /// Returns how many resource lookups were made.
    pub fn lookup_calls(&self) -> u32 {
        self.state.read().unwrap().lookup_calls
    }

    /// Returns how many reservation creations were attempted.
    pub fn create_calls(&self) -> u32 {
        self.state.read().unwrap().create_calls
    }

    /// Returns how many reservation deletions were attempted.
    pub fn delete_calls(&self) -> u32 {
        self.state.read().unwrap().delete_calls
    }
}

#[async_trait]
impl ReservationClient for InMemoryReservationService {
    fn service_name(&self) -> &'static str {
        self.service
    }

    async fn get_resource(&self, id: u64) -> Result<Resource, RemoteError> {
        let mut state = self.state.write().unwrap();
        state.lookup_calls += 1;

        if state.resources.contains(&id) {
            Ok(Resource { id })
        } else {
            Err(RemoteError::NotFound(format!("{} {id}", self.service)))
        }
    }

    async fn create_reservation(
        &self,
        request: &ReservationRequest,
    ) -> Result<Reservation, RemoteError> {
        let mut state = self.state.write().unwrap();
        state.create_calls += 1;

        if state.fail_on_create {
            return Err(RemoteError::Unavailable(format!(
                "{} service down",
                self.service
            )));
        }

        state.next_id += 1;
        let id = format!("{}-{:04}", self.prefix, state.next_id);
        let reservation = Reservation {
            id: id.clone(),
            resource_id: request.resource_id,
            booking_date: request.booking_date,
        };
        state.reservations.insert(id, reservation.clone());

        Ok(reservation)
    }

    async fn delete_reservation(&self, reservation_id: &str) -> Result<(), RemoteError> {
        let mut state = self.state.write().unwrap();
        state.delete_calls += 1;

        if state.fail_on_delete {
            return Err(RemoteError::Unavailable(format!(
                "{} service down",
                self.service
            )));
        }

        state
            .reservations
            .remove(reservation_id)
            .map(|_| ())
            .ok_or_else(|| RemoteError::NotFound(reservation_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::CustomerInfo;
    use chrono::{TimeZone, Utc};

    fn request(resource_id: u64) -> ReservationRequest {
        ReservationRequest {
            customer: CustomerInfo {
                name: "Jane Doe".to_string(),
                email: "jane.doe@example.com".to_string(),
                phone_number: "0791574891".to_string(),
            },
            resource_id,
            booking_date: Utc.with_ymd_and_hms(2999, 1, 1, 9, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn reserve_and_release() {
        let service = InMemoryReservationService::taxi();
        service.add_resource(1);

        service.get_resource(1).await.unwrap();
        let reservation = service.create_reservation(&request(1)).await.unwrap();
        assert!(reservation.id.starts_with("TAXI-"));
        assert_eq!(service.reservation_count(), 1);

        service.delete_reservation(&reservation.id).await.unwrap();
        assert_eq!(service.reservation_count(), 0);
    }

    #[tokio::test]
    async fn unknown_resource_is_not_found() {
        let service = InMemoryReservationService::hotel();
        let err = service.get_resource(99).await.unwrap_err();
        assert_eq!(err, RemoteError::NotFound("hotel 99".to_string()));
    }

    #[tokio::test]
    async fn fail_on_create_leaves_no_reservation() {
        let service = InMemoryReservationService::taxi();
        service.add_resource(1);
        service.set_fail_on_create(true);

        let err = service.create_reservation(&request(1)).await.unwrap_err();
        assert!(matches!(err, RemoteError::Unavailable(_)));
        assert_eq!(service.reservation_count(), 0);
        assert_eq!(service.create_calls(), 1);
    }

    #[tokio::test]
    async fn fail_on_delete_leaves_reservation_behind() {
        let service = InMemoryReservationService::hotel();
        service.add_resource(1);
        let reservation = service.create_reservation(&request(1)).await.unwrap();

        service.set_fail_on_delete(true);
        let err = service
            .delete_reservation(&reservation.id)
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Unavailable(_)));
        assert!(service.has_reservation(&reservation.id));
    }

    #[tokio::test]
    async fn sequential_reservation_ids() {
        let service = InMemoryReservationService::taxi();
        service.add_resource(1);

        let r1 = service.create_reservation(&request(1)).await.unwrap();
        let r2 = service.create_reservation(&request(1)).await.unwrap();

        assert_eq!(r1.id, "TAXI-0001");
        assert_eq!(r2.id, "TAXI-0002");
    }

    #[tokio::test]
    async fn clones_share_state() {
        let service = InMemoryReservationService::taxi();
        let handle = service.clone();
        service.add_resource(1);

        service.create_reservation(&request(1)).await.unwrap();
        assert_eq!(handle.reservation_count(), 1);
        assert_eq!(handle.create_calls(), 1);
    }
}
