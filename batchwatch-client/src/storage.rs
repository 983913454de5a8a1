//! Storage endpoint

use batchwatch_core::dto::store::{StoreRequest, StoreResponse};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::{handle_response, normalize_base_url};

/// Admin secret the storage service accepts in development setups
pub const DEFAULT_ADMIN_SECRET: &str = "dev-secret-key-2025";

/// Path of the admin endpoint that ingests a batch result file
pub const STORE_RESULTS_PATH: &str = "/api/admin/analysis/store-batch-results";

/// HTTP client for the admin storage endpoint
#[derive(Debug, Clone)]
pub struct StorageClient {
    /// Base URL of the storage service (e.g., "http://localhost:3000")
    base_url: String,
    /// Admin bearer secret
    admin_secret: String,
    /// HTTP client instance
    client: Client,
}

impl StorageClient {
    /// Create a new storage client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the storage service
    /// * `admin_secret` - Secret sent as a bearer token
    pub fn new(base_url: impl Into<String>, admin_secret: impl Into<String>) -> Self {
        Self::with_client(base_url, admin_secret, Client::new())
    }

    /// Create a new storage client with a custom HTTP client
    pub fn with_client(
        base_url: impl Into<String>,
        admin_secret: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            admin_secret: admin_secret.into(),
            client,
        }
    }

    /// Get the base URL of the storage service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Forward a batch result file to storage
    ///
    /// The file is referenced by id only; the storage service fetches and
    /// ingests it itself.
    ///
    /// # Arguments
    /// * `req` - File id, batch id and category of the result
    /// * `timeout` - Timeout for this request
    ///
    /// # Returns
    /// The storage service's response, including row counters
    pub async fn store_results(
        &self,
        req: &StoreRequest,
        timeout: Duration,
    ) -> Result<StoreResponse> {
        let url = format!("{}{}", self.base_url, STORE_RESULTS_PATH);
        debug!("POST {} (file {})", url, req.file_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.admin_secret)
            .json(req)
            .timeout(timeout)
            .send()
            .await?;

        let body: StoreResponse = handle_response(response).await?;

        if !body.is_success() {
            let reason = body
                .error
                .or(body.message)
                .unwrap_or_else(|| "storage endpoint reported failure".to_string());
            return Err(ClientError::Rejected(reason));
        }

        Ok(body)
    }
}
