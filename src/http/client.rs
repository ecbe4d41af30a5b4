//! HTTP client issuing single, unretried JSON requests.

use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::status::classify_status;

/// Why a JSON GET did not produce a value.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request never completed, the body could not be read, or the status was not 2xx.
    #[error("{0}")]
    Network(String),
    /// A body arrived but is not the expected JSON shape.
    #[error("{0}")]
    Decode(String),
}

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Performs exactly one GET request and deserializes the JSON response.
    #[tracing::instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RequestError> {
        debug!("GET JSON from {}...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RequestError::Network(format!("Failed to send request: {}", e)))?;

        let response = response.error_for_status().map_err(|e| {
            RequestError::Network(match classify_status(&e) {
                Some(status) => status.to_string(),
                None => e.to_string(),
            })
        })?;

        let body = response
            .bytes()
            .await
            .map_err(|e| RequestError::Network(format!("Failed to read response body: {}", e)))?;

        debug!("Received {} bytes from {}", body.len(), url);

        serde_json::from_slice(&body)
            .map_err(|e| RequestError::Decode(format!("Failed to parse JSON response: {}", e)))
    }
}
