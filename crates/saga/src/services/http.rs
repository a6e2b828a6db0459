//! HTTP adapters for the remote taxi and hotel reservation services.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::{RemoteError, Reservation, ReservationClient, ReservationRequest, Resource};

/// Reqwest-based [`ReservationClient`] for one remote backend.
///
/// One instance per backend (taxi or hotel), configured with the backend's
/// base URL, an optional API key and a request timeout. A timed-out or
/// unreachable call surfaces as [`RemoteError::Unavailable`], which the
/// coordinator treats like any other remote failure.
#[derive(Debug, Clone)]
pub struct HttpReservationClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    service: &'static str,
    resource_path: &'static str,
}

impl HttpReservationClient {
    /// Default bound on every remote call.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a client for the remote taxi service.
    pub fn taxi(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        Self::for_backend("taxi", "taxis", base_url, api_key, timeout)
    }

    /// Creates a client for the remote hotel service.
    pub fn hotel(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        Self::for_backend("hotel", "hotels", base_url, api_key, timeout)
    }

    fn for_backend(
        service: &'static str,
        resource_path: &'static str,
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            api_key,
            service,
            resource_path,
        })
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header("x-api-key", key),
            None => builder,
        }
    }

    fn transport_error(&self, error: reqwest::Error) -> RemoteError {
        if error.is_timeout() {
            RemoteError::Unavailable(format!("{} request timed out", self.service))
        } else {
            RemoteError::Unavailable(error.to_string())
        }
    }
}

#[async_trait]
impl ReservationClient for HttpReservationClient {
    fn service_name(&self) -> &'static str {
        self.service
    }

    async fn get_resource(&self, id: u64) -> Result<Resource, RemoteError> {
        let url = format!("{}/api/{}/{id}", self.base_url, self.resource_path);
        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        match response.status() {
            StatusCode::OK => response
                .json::<Resource>()
                .await
                .map_err(|e| RemoteError::Unavailable(format!("invalid response body: {e}"))),
            StatusCode::NOT_FOUND => Err(RemoteError::NotFound(format!("{} {id}", self.service))),
            status if status.is_client_error() => {
                let body = response.text().await.unwrap_or_default();
                Err(RemoteError::Rejected(body_or_status(body, status)))
            }
            status => Err(RemoteError::Unavailable(status.to_string())),
        }
    }

    async fn create_reservation(
        &self,
        request: &ReservationRequest,
    ) -> Result<Reservation, RemoteError> {
        let url = format!("{}/api/bookings", self.base_url);
        let response = self
            .authorized(self.client.post(&url))
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<Reservation>()
                .await
                .map_err(|e| RemoteError::Unavailable(format!("invalid response body: {e}")))
        } else if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            Err(RemoteError::Rejected(body_or_status(body, status)))
        } else {
            Err(RemoteError::Unavailable(status.to_string()))
        }
    }

    async fn delete_reservation(&self, reservation_id: &str) -> Result<(), RemoteError> {
        let url = format!("{}/api/bookings/{reservation_id}", self.base_url);
        let response = self
            .authorized(self.client.delete(&url))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(RemoteError::NotFound(reservation_id.to_string())),
            status => Err(RemoteError::Unavailable(status.to_string())),
        }
    }
}

fn body_or_status(body: String, status: StatusCode) -> String {
    if body.trim().is_empty() {
        status.to_string()
    } else {
        body
    }
}
