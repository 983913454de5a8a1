//! Batchwatch HTTP Clients
//!
//! Typed HTTP clients for the two services the batch monitor talks to:
//!
//! - [`BatchApiClient`]: reads batch status documents from the remote batch API
//! - [`StorageClient`]: forwards completed result files to the admin storage endpoint
//!
//! Both the monitor and the CLI go through these clients so request shapes and
//! error handling stay identical.
//!
//! # Example
//!
//! ```no_run
//! use batchwatch_client::BatchApiClient;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = BatchApiClient::new("https://api.openai.com/v1", "sk-...");
//!
//!     let batch = client
//!         .get_batch("batch_68f7fda62de88190a104354ce9e736a4", Duration::from_secs(10))
//!         .await?;
//!
//!     println!("{} is {}", batch.id, batch.status);
//!     Ok(())
//! }
//! ```

mod batches;
pub mod error;
mod storage;

// Re-export commonly used types
pub use batches::BatchApiClient;
pub use error::{ClientError, Result};
pub use storage::{DEFAULT_ADMIN_SECRET, STORE_RESULTS_PATH, StorageClient};

use serde::de::DeserializeOwned;

// =============================================================================
// Response Handlers
// =============================================================================

/// Handle an API response and deserialize JSON
///
/// Checks the status code and returns an appropriate error if the request
/// failed, or deserializes the response body if successful.
pub(crate) async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api_error(status.as_u16(), error_text));
    }

    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|e| {
        ClientError::ParseError(format!("Failed to parse JSON response: {}: {}", e, body))
    })
}

/// Normalizes a base URL so paths can be appended with `/`
pub(crate) fn normalize_base_url(base_url: impl Into<String>) -> String {
    base_url.into().trim_end_matches('/').to_string()
}
