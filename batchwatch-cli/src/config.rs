//! Configuration module
//!
//! Handles CLI configuration: service endpoints, credentials and timeouts.

use anyhow::{Context, Result};
use batchwatch_client::{BatchApiClient, StorageClient};
use batchwatch_core::domain::batch::BatchJob;
use batchwatch_core::manifest;
use std::path::PathBuf;
use std::time::Duration;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the batch API
    pub batch_api_url: String,
    /// Batch API credential; only commands that query the API need it
    pub api_key: Option<String>,
    /// Base URL of the storage service
    pub storage_url: String,
    /// Storage endpoint admin secret
    pub admin_secret: String,
    /// Optional JSON job manifest
    pub manifest: Option<PathBuf>,
    /// Timeout for batch status requests
    pub status_timeout: Duration,
    /// Timeout for store requests
    pub store_timeout: Duration,
}

impl Config {
    /// Builds a batch API client, failing when no credential is configured
    pub fn batch_client(&self) -> Result<BatchApiClient> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .context("No batch API key configured (set OPENAI_API_KEY or pass --api-key)")?;

        Ok(BatchApiClient::new(self.batch_api_url.clone(), api_key))
    }

    /// Builds a storage endpoint client
    pub fn storage_client(&self) -> StorageClient {
        StorageClient::new(self.storage_url.clone(), self.admin_secret.clone())
    }

    /// Loads the watched jobs from the manifest or the builtin list
    pub fn jobs(&self) -> Result<Vec<BatchJob>> {
        manifest::jobs_from_source(self.manifest.as_deref()).context("Failed to load job manifest")
    }
}
