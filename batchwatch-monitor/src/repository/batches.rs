//! Batch status repository
//!
//! Reads batch status documents from the remote batch API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use batchwatch_client::BatchApiClient;
use batchwatch_core::dto::batch::BatchObject;
use std::time::Duration;

/// Repository trait for batch status lookups
#[async_trait]
pub trait BatchRepository: Send + Sync {
    /// Fetches the current status document of a batch
    ///
    /// # Arguments
    /// * `batch_id` - Opaque batch identifier
    async fn fetch_status(&self, batch_id: &str) -> Result<BatchObject>;
}

/// HTTP implementation of BatchRepository
pub struct HttpBatchRepository {
    client: BatchApiClient,
    timeout: Duration,
}

impl HttpBatchRepository {
    /// Creates a new HTTP batch repository
    ///
    /// # Arguments
    /// * `client` - Batch API client
    /// * `timeout` - Per-request timeout for status lookups
    pub fn new(client: BatchApiClient, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl BatchRepository for HttpBatchRepository {
    async fn fetch_status(&self, batch_id: &str) -> Result<BatchObject> {
        self.client
            .get_batch(batch_id, self.timeout)
            .await
            .with_context(|| format!("Failed to check batch {}", batch_id))
    }
}
