//! Storage endpoint DTOs

use serde::{Deserialize, Serialize};

/// Body of `POST /api/admin/analysis/store-batch-results`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRequest {
    #[serde(rename = "fileId")]
    pub file_id: String,
    #[serde(rename = "batchId")]
    pub batch_id: String,
    #[serde(rename = "type")]
    pub category: String,
}

/// Response of the storage endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub stats: StoreStats,
}

/// Row counters reported after a store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub stored: u64,
    #[serde(default)]
    pub failed: u64,
    #[serde(default)]
    pub skipped: u64,
}

impl StoreResponse {
    /// True unless the endpoint explicitly reported `success: false`
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(true)
    }
}
