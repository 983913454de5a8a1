//! Batchwatch CLI
//!
//! One-shot operator commands for the watched batch jobs: list them, check
//! their status, and forward a finished batch to storage by hand.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "batchwatch")]
#[command(about = "Batch job status and storage CLI", long_about = None)]
struct Cli {
    /// Batch API base URL
    #[arg(long, env = "BATCH_API_URL", default_value = "https://api.openai.com/v1")]
    batch_api_url: String,

    /// Batch API credential
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Storage service base URL
    #[arg(long, env = "STORAGE_BASE_URL", default_value = "http://localhost:3000")]
    storage_url: String,

    /// Storage endpoint admin secret
    #[arg(
        long,
        env = "ADMIN_SECRET",
        default_value = batchwatch_client::DEFAULT_ADMIN_SECRET,
        hide_env_values = true
    )]
    admin_secret: String,

    /// JSON job manifest (builtin list when omitted)
    #[arg(long, env = "BATCH_MANIFEST")]
    manifest: Option<PathBuf>,

    /// Timeout for batch status requests, in seconds
    #[arg(long, env = "STATUS_TIMEOUT", default_value_t = 10)]
    status_timeout: u64,

    /// Timeout for store requests, in seconds
    #[arg(long, env = "STORE_TIMEOUT", default_value_t = 120)]
    store_timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        batch_api_url: cli.batch_api_url,
        api_key: cli.api_key,
        storage_url: cli.storage_url,
        admin_secret: cli.admin_secret,
        manifest: cli.manifest,
        status_timeout: std::time::Duration::from_secs(cli.status_timeout),
        store_timeout: std::time::Duration::from_secs(cli.store_timeout),
    };

    handle_command(cli.command, &config).await
}
