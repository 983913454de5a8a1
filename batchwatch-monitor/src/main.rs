//! Batchwatch Monitor
//!
//! Watches a fixed list of batch jobs on the remote batch API and forwards
//! each completed result file to the admin storage endpoint.
//!
//! Architecture:
//! - Configuration: Load settings from environment with defaults
//! - Repositories: HTTP access to the batch API and the storage endpoint
//! - Services: Decide what a batch status means for the job
//! - Scheduler: The fixed-interval check loop
//!
//! The monitor exits once every job is either stored or failed. Job state
//! lives in memory only; a restart starts over from the manifest.

mod config;
mod repository;
mod scheduler;
mod service;

use anyhow::{Context, Result};
use batchwatch_client::{BatchApiClient, StorageClient};
use batchwatch_core::domain::batch::{BatchJob, JobState};
use batchwatch_core::manifest;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::repository::{HttpBatchRepository, HttpResultRepository};
use crate::scheduler::{BatchMonitor, MonitorSummary};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "batchwatch_monitor=info,batchwatch_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting batch monitor");

    if let Err(e) = run().await {
        error!("Unexpected error: {:#}", e);
        return Err(e);
    }

    Ok(())
}

async fn run() -> Result<()> {
    // Load configuration
    let config = load_config()?;
    info!(
        "Loaded configuration: batch_api_url={}, storage_url={}",
        config.batch_api_url, config.storage_url
    );

    let jobs = manifest::jobs_from_source(config.manifest_path.as_deref())
        .context("Failed to load job manifest")?;

    log_jobs(&jobs);

    // Initialize repositories
    let batches = Arc::new(HttpBatchRepository::new(
        BatchApiClient::new(config.batch_api_url.clone(), config.api_key.clone()),
        config.status_timeout,
    ));
    let results = Arc::new(HttpResultRepository::new(
        StorageClient::new(config.storage_url.clone(), config.admin_secret.clone()),
        config.store_timeout,
    ));

    let mut monitor = BatchMonitor::new(jobs, batches, results, config.poll_interval);

    info!("Press Ctrl+C to stop");

    let summary = tokio::select! {
        summary = monitor.run() => Some(summary),
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl+C")?;
            None
        }
    };

    match summary {
        Some(summary) => log_summary(&summary, monitor.jobs()),
        None => warn!("Monitoring stopped by user (Ctrl+C)"),
    }

    Ok(())
}

/// Loads configuration from environment variables and validates it
fn load_config() -> Result<Config> {
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate()?;
    Ok(config)
}

fn log_jobs(jobs: &[BatchJob]) {
    info!("Watching {} batch job(s)", jobs.len());
    for job in jobs {
        info!("  - {} [{}] {}", job.batch_id, job.category, job.description);
    }
}

fn log_summary(summary: &MonitorSummary, jobs: &[BatchJob]) {
    info!(
        "All batches resolved after {} check(s): {} stored, {} failed",
        summary.checks, summary.stored, summary.failed
    );
    info!(
        "Storage reported {} row(s) stored, {} row(s) failed",
        summary.rows_stored, summary.rows_failed
    );
    for job in jobs.iter().filter(|j| j.state == JobState::Failed) {
        warn!("  - {} ({}) was not stored", job.description, job.batch_id);
    }
}
