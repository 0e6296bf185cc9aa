//! HTTP client for the carstore REST API.
//!
//! # Overview
//!
//! [`CarstoreClient`] wraps the four calls the API exposes and maps every
//! response onto a typed outcome: a parsed payload, a distinguished
//! not-found, or a [`ClientError`] classifying what went wrong. Status
//! handling is strict on purpose: each operation has a small documented
//! success set, and anything outside it is surfaced as
//! [`ClientError::UnexpectedStatus`] rather than silently tolerated.
//!
//! The client never retries. A timed-out or cancelled call leaves no
//! background work behind; dropping the future aborts the request.
//!
//! # Example
//!
//! ```ignore
//! use carstore_client::CarstoreClient;
//! use url::Url;
//!
//! let base_url = Url::parse("http://localhost:5000")?;
//! let client = CarstoreClient::new(base_url);
//!
//! let created = client.create_car("Model S", 2023).await?;
//! let car = client.read_car(&created.id).await?;
//! ```

use std::time::Duration;

use reqwest::StatusCode;
use url::Url;

pub mod error;
pub mod types;

pub use error::ClientError;
pub use types::{Car, CreatedCar};

use types::CarBody;

/// Timeout applied to every request issued by a client constructed with
/// [`CarstoreClient::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for one carstore API endpoint.
///
/// Cloning is cheap; clones share the underlying connection pool, and a
/// single client may serve any number of concurrent in-flight calls.
#[derive(Debug, Clone)]
pub struct CarstoreClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CarstoreClient {
    /// Creates a client with its own HTTP handle and [`DEFAULT_TIMEOUT`].
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (should not happen in
    /// practice).
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");
        Self::with_http_client(base_url, http)
    }

    /// Creates a client on top of an externally owned HTTP handle. The
    /// handle's own timeout configuration applies to every call.
    #[must_use]
    pub fn with_http_client(base_url: Url, http: reqwest::Client) -> Self {
        Self { http, base_url }
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Creates a car, returning the server-assigned id.
    ///
    /// Success is exactly HTTP 201 with an `{"id": ...}` body.
    pub async fn create_car(&self, model: &str, year: i64) -> Result<CreatedCar, ClientError> {
        let url = self.collection_url()?;
        tracing::debug!("Sending POST request to {}", url);

        let response = self
            .http
            .post(url)
            .json(&CarBody { model, year })
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Failed to send create request: {}", e);
                ClientError::Network(e.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::CREATED {
            tracing::warn!("Unexpected status {} creating car", status.as_u16());
            return Err(ClientError::UnexpectedStatus(status.as_u16()));
        }

        response
            .json::<CreatedCar>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Reads a car by id.
    ///
    /// Returns `Ok(None)` when the API reports the car as gone (404); the
    /// caller decides what a vanished car means. Success is exactly 200.
    pub async fn read_car(&self, id: &str) -> Result<Option<Car>, ClientError> {
        let url = self.item_url(id)?;
        tracing::debug!("Sending GET request to {}", url);

        let response = self.http.get(url).send().await.map_err(|e| {
            tracing::warn!("Failed to send read request: {}", e);
            ClientError::Network(e.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("Car {} not found", id);
            return Ok(None);
        }
        if status != StatusCode::OK {
            tracing::warn!("Unexpected status {} reading car {}", status.as_u16(), id);
            return Err(ClientError::UnexpectedStatus(status.as_u16()));
        }

        let car = response
            .json::<Car>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(Some(car))
    }

    /// Replaces a car's attributes, returning the server's authoritative
    /// echo of the stored object. Success is exactly 200.
    pub async fn update_car(&self, id: &str, model: &str, year: i64) -> Result<Car, ClientError> {
        let url = self.item_url(id)?;
        tracing::debug!("Sending PUT request to {}", url);

        let response = self
            .http
            .put(url)
            .json(&CarBody { model, year })
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Failed to send update request: {}", e);
                ClientError::Network(e.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!("Unexpected status {} updating car {}", status.as_u16(), id);
            return Err(ClientError::UnexpectedStatus(status.as_u16()));
        }

        response
            .json::<Car>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Deletes a car.
    ///
    /// The API signals success with either 204 or 200; both are accepted
    /// and indistinguishable to the caller. A 404 also counts as success:
    /// a car that is already gone is a completed delete.
    pub async fn delete_car(&self, id: &str) -> Result<(), ClientError> {
        let url = self.item_url(id)?;
        tracing::debug!("Sending DELETE request to {}", url);

        let response = self.http.delete(url).send().await.map_err(|e| {
            tracing::warn!("Failed to send delete request: {}", e);
            ClientError::Network(e.to_string())
        })?;

        let status = response.status();
        match status {
            StatusCode::NO_CONTENT | StatusCode::OK => Ok(()),
            StatusCode::NOT_FOUND => {
                tracing::debug!("Car {} already absent on delete", id);
                Ok(())
            }
            other => {
                tracing::warn!("Unexpected status {} deleting car {}", other.as_u16(), id);
                Err(ClientError::UnexpectedStatus(other.as_u16()))
            }
        }
    }

    fn collection_url(&self) -> Result<Url, ClientError> {
        self.endpoint("cars")
    }

    fn item_url(&self, id: &str) -> Result<Url, ClientError> {
        self.endpoint(&format!("cars/{id}"))
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        let raw = format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|e| ClientError::InvalidRequest(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> CarstoreClient {
        CarstoreClient::new(Url::parse(&server.uri()).unwrap())
    }

    #[tokio::test]
    async fn create_posts_json_and_returns_the_assigned_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cars"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"model": "Model S", "year": 2023})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "abc123"})))
            .expect(1)
            .mount(&server)
            .await;

        let created = client_for(&server).create_car("Model S", 2023).await.unwrap();
        assert_eq!(created.id, "abc123");
    }

    #[tokio::test]
    async fn create_rejects_any_status_other_than_201() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cars"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "abc123"})))
            .mount(&server)
            .await;

        let error = client_for(&server).create_car("Model S", 2023).await.unwrap_err();
        assert!(matches!(error, ClientError::UnexpectedStatus(200)));
    }

    #[tokio::test]
    async fn create_surfaces_server_errors_with_their_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cars"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let error = client_for(&server).create_car("Model S", 2023).await.unwrap_err();
        assert_eq!(error.status(), Some(500));
        assert!(error.to_string().contains("500"));
    }

    #[tokio::test]
    async fn create_reports_unparseable_bodies_as_decode_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cars"))
            .respond_with(ResponseTemplate::new(201).set_body_string("not json"))
            .mount(&server)
            .await;

        let error = client_for(&server).create_car("Model S", 2023).await.unwrap_err();
        assert!(matches!(error, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn read_parses_the_full_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cars/abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "abc123",
                "model": "Model S",
                "year": 2023,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let car = client_for(&server).read_car("abc123").await.unwrap();
        assert_eq!(
            car,
            Some(Car {
                id: "abc123".into(),
                model: "Model S".into(),
                year: 2023,
            })
        );
    }

    #[tokio::test]
    async fn read_maps_404_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cars/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let car = client_for(&server).read_car("gone").await.unwrap();
        assert_eq!(car, None);
    }

    #[tokio::test]
    async fn read_rejects_statuses_outside_200_and_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cars/abc123"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let error = client_for(&server).read_car("abc123").await.unwrap_err();
        assert!(matches!(error, ClientError::UnexpectedStatus(503)));
    }

    #[tokio::test]
    async fn update_puts_json_and_adopts_the_server_echo() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/cars/abc123"))
            .and(body_json(json!({"model": "Model 3", "year": 2024})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "abc123",
                "model": "MODEL 3",
                "year": 2024,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let car = client_for(&server).update_car("abc123", "Model 3", 2024).await.unwrap();
        // Whatever the server stored wins, even when it differs from what
        // was sent.
        assert_eq!(car.model, "MODEL 3");
        assert_eq!(car.year, 2024);
    }

    #[tokio::test]
    async fn update_rejects_any_status_other_than_200() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/cars/abc123"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let error = client_for(&server).update_car("abc123", "Model 3", 2024).await.unwrap_err();
        assert!(matches!(error, ClientError::UnexpectedStatus(204)));
    }

    #[tokio::test]
    async fn delete_accepts_204_and_200_alike() {
        for status in [204, 200] {
            let server = MockServer::start().await;
            Mock::given(method("DELETE"))
                .and(path("/cars/abc123"))
                .respond_with(ResponseTemplate::new(status))
                .expect(1)
                .mount(&server)
                .await;

            client_for(&server).delete_car("abc123").await.unwrap();
        }
    }

    #[tokio::test]
    async fn delete_treats_404_as_already_deleted() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/cars/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        client_for(&server).delete_car("gone").await.unwrap();
    }

    #[tokio::test]
    async fn delete_surfaces_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/cars/abc123"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let error = client_for(&server).delete_car("abc123").await.unwrap_err();
        assert!(matches!(error, ClientError::UnexpectedStatus(500)));
    }

    #[tokio::test]
    async fn timeouts_surface_as_network_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cars/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(250)))
            .mount(&server)
            .await;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        let client = CarstoreClient::with_http_client(Url::parse(&server.uri()).unwrap(), http);

        let error = client.read_car("slow").await.unwrap_err();
        assert!(matches!(error, ClientError::Network(_)));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_network_error() {
        // Grab a free port and release it so nothing is listening there.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let base_url = Url::parse(&format!("http://127.0.0.1:{port}")).unwrap();

        let error = CarstoreClient::new(base_url).read_car("abc123").await.unwrap_err();
        assert!(matches!(error, ClientError::Network(_)));
    }

    #[test]
    fn endpoints_compose_regardless_of_trailing_slash() {
        let with_slash = CarstoreClient::new(Url::parse("http://localhost:5000/").unwrap());
        let without_slash = CarstoreClient::new(Url::parse("http://localhost:5000").unwrap());

        assert_eq!(
            with_slash.item_url("abc123").unwrap(),
            without_slash.item_url("abc123").unwrap()
        );
        assert_eq!(
            with_slash.collection_url().unwrap().as_str(),
            "http://localhost:5000/cars"
        );
        assert_eq!(without_slash.base_url().as_str(), "http://localhost:5000/");
    }
}
