//! Monitor configuration
//!
//! Defines all configurable parameters for the monitor: credentials, service
//! endpoints, the check interval and per-request timeouts.

use batchwatch_client::DEFAULT_ADMIN_SECRET;
use std::path::PathBuf;
use std::time::Duration;

/// Monitor configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the batch API
    pub api_key: String,

    /// Bearer secret for the admin storage endpoint
    pub admin_secret: String,

    /// Batch API base URL (e.g., "https://api.openai.com/v1")
    pub batch_api_url: String,

    /// Storage service base URL (e.g., "http://localhost:3000")
    pub storage_url: String,

    /// Fixed wait between two checks
    pub poll_interval: Duration,

    /// Timeout of a single batch status request
    pub status_timeout: Duration,

    /// Timeout of a single store request
    pub store_timeout: Duration,

    /// Optional JSON job manifest replacing the builtin list
    pub manifest_path: Option<PathBuf>,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            admin_secret: DEFAULT_ADMIN_SECRET.to_string(),
            batch_api_url: "https://api.openai.com/v1".to_string(),
            storage_url: "http://localhost:3000".to_string(),
            poll_interval: Duration::from_secs(30 * 60),
            status_timeout: Duration::from_secs(10),
            store_timeout: Duration::from_secs(120),
            manifest_path: None,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - OPENAI_API_KEY (required)
    /// - ADMIN_SECRET (optional, default: dev-secret-key-2025)
    /// - BATCH_API_URL (optional, default: https://api.openai.com/v1)
    /// - STORAGE_BASE_URL (optional, default: http://localhost:3000)
    /// - POLL_INTERVAL (optional, seconds, default: 1800)
    /// - STATUS_TIMEOUT (optional, seconds, default: 10)
    /// - STORE_TIMEOUT (optional, seconds, default: 120)
    /// - BATCH_MANIFEST (optional, path to a JSON job list)
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY environment variable not set"))?;

        let defaults = Self::new(api_key);

        let admin_secret = std::env::var("ADMIN_SECRET").unwrap_or(defaults.admin_secret);

        let batch_api_url = std::env::var("BATCH_API_URL").unwrap_or(defaults.batch_api_url);

        let storage_url = std::env::var("STORAGE_BASE_URL").unwrap_or(defaults.storage_url);

        let poll_interval = env_secs("POLL_INTERVAL").unwrap_or(defaults.poll_interval);

        let status_timeout = env_secs("STATUS_TIMEOUT").unwrap_or(defaults.status_timeout);

        let store_timeout = env_secs("STORE_TIMEOUT").unwrap_or(defaults.store_timeout);

        let manifest_path = std::env::var("BATCH_MANIFEST")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            api_key: defaults.api_key,
            admin_secret,
            batch_api_url,
            storage_url,
            poll_interval,
            status_timeout,
            store_timeout,
            manifest_path,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.is_empty() {
            anyhow::bail!("api_key cannot be empty");
        }

        if self.admin_secret.is_empty() {
            anyhow::bail!("admin_secret cannot be empty");
        }

        for (name, url) in [
            ("batch_api_url", &self.batch_api_url),
            ("storage_url", &self.storage_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", name);
            }
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.status_timeout.is_zero() {
            anyhow::bail!("status_timeout must be greater than 0");
        }

        if self.store_timeout.is_zero() {
            anyhow::bail!("store_timeout must be greater than 0");
        }

        Ok(())
    }
}

/// Reads a whole number of seconds from an environment variable
fn env_secs(name: &str) -> Option<Duration> {
    std::env::var(name)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
