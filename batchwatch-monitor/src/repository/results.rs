//! Result storage repository
//!
//! Forwards completed batch output files to the admin storage endpoint.

use anyhow::{Context, Result};
use async_trait::async_trait;
use batchwatch_client::StorageClient;
use batchwatch_core::domain::batch::BatchJob;
use batchwatch_core::dto::store::{StoreRequest, StoreResponse};
use std::time::Duration;

/// Repository trait for storing batch results
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Stores the output file of a completed batch
    ///
    /// # Arguments
    /// * `job` - The job the output belongs to
    /// * `file_id` - Output file id reported by the batch API
    async fn store(&self, job: &BatchJob, file_id: &str) -> Result<StoreResponse>;
}

/// HTTP implementation of ResultRepository
pub struct HttpResultRepository {
    client: StorageClient,
    timeout: Duration,
}

impl HttpResultRepository {
    /// Creates a new HTTP result repository
    ///
    /// # Arguments
    /// * `client` - Storage endpoint client
    /// * `timeout` - Per-request timeout for store calls
    pub fn new(client: StorageClient, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl ResultRepository for HttpResultRepository {
    async fn store(&self, job: &BatchJob, file_id: &str) -> Result<StoreResponse> {
        let request = StoreRequest {
            file_id: file_id.to_string(),
            batch_id: job.batch_id.clone(),
            category: job.category.clone(),
        };

        self.client
            .store_results(&request, self.timeout)
            .await
            .with_context(|| format!("Failed to store results for batch {}", job.batch_id))
    }
}
