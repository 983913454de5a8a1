//! Batch API endpoints

use batchwatch_core::dto::batch::BatchObject;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::{handle_response, normalize_base_url};

/// HTTP client for the remote batch API
#[derive(Debug, Clone)]
pub struct BatchApiClient {
    /// Base URL of the API (e.g., "https://api.openai.com/v1")
    base_url: String,
    /// Bearer credential
    api_key: String,
    /// HTTP client instance
    client: Client,
}

impl BatchApiClient {
    /// Create a new batch API client
    ///
    /// # Arguments
    /// * `base_url` - The API base URL, including any version prefix
    /// * `api_key` - Credential sent as a bearer token
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(base_url, api_key, Client::new())
    }

    /// Create a new batch API client with a custom HTTP client
    ///
    /// This allows you to configure proxies, TLS settings, default timeouts, etc.
    pub fn with_client(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            api_key: api_key.into(),
            client,
        }
    }

    /// Get the base URL of the batch API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the status document of one batch
    ///
    /// # Arguments
    /// * `batch_id` - Opaque batch identifier
    /// * `timeout` - Timeout for this request
    ///
    /// # Returns
    /// The current batch status document
    pub async fn get_batch(&self, batch_id: &str, timeout: Duration) -> Result<BatchObject> {
        if batch_id.is_empty() {
            return Err(ClientError::InvalidRequest(
                "batch id cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/batches/{}", self.base_url, batch_id);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .timeout(timeout)
            .send()
            .await?;

        handle_response(response).await
    }
}
