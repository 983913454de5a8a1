//! Single-batch command handlers
//!
//! Handles `get` (inspect one batch) and `store` (forward one finished batch
//! to storage without waiting for the monitor).

use anyhow::{Context, Result};
use batchwatch_core::domain::batch::{BatchJob, BatchStatus};
use batchwatch_core::dto::batch::BatchObject;
use batchwatch_core::dto::store::StoreRequest;
use chrono::{DateTime, Local, Utc};
use colored::*;

use super::colorize_status;
use crate::config::Config;

/// Category used when neither the flag nor the manifest provides one
const DEFAULT_CATEGORY: &str = "motion_quality";

/// Get and display a single batch
pub async fn get_batch(config: &Config, batch_id: &str) -> Result<()> {
    let client = config.batch_client()?;
    let batch = client
        .get_batch(batch_id, config.status_timeout)
        .await
        .with_context(|| format!("Failed to fetch batch {}", batch_id))?;

    print_batch_details(&batch);

    Ok(())
}

/// Forward a completed batch's output file to storage
pub async fn store_batch(config: &Config, batch_id: &str, category: Option<String>) -> Result<()> {
    let client = config.batch_client()?;
    let jobs = config.jobs()?;
    let category = resolve_category(category, &jobs, batch_id);

    let batch = client
        .get_batch(batch_id, config.status_timeout)
        .await
        .with_context(|| format!("Failed to fetch batch {}", batch_id))?;

    if batch.status != BatchStatus::Completed {
        println!(
            "{} Batch {} is {}, nothing to store yet.",
            "!".yellow(),
            batch_id.bold(),
            colorize_status(batch.status)
        );
        return Ok(());
    }

    let Some(file_id) = batch.output_file() else {
        println!(
            "{} Batch {} completed without an output file.",
            "!".yellow(),
            batch_id.bold()
        );
        return Ok(());
    };

    println!(
        "Storing {} from batch {} as {}...",
        file_id.cyan(),
        batch_id.bold(),
        category
    );

    let request = StoreRequest {
        file_id: file_id.to_string(),
        batch_id: batch_id.to_string(),
        category,
    };

    let response = config
        .storage_client()
        .store_results(&request, config.store_timeout)
        .await
        .with_context(|| format!("Failed to store results for batch {}", batch_id))?;

    println!("{}", "✓ Results stored".green().bold());
    println!("  Total:    {}", response.stats.total);
    println!("  Stored:   {}", response.stats.stored.to_string().green());
    println!("  Failed:   {}", response.stats.failed.to_string().red());
    if response.stats.skipped > 0 {
        println!("  Skipped:  {}", response.stats.skipped.to_string().yellow());
    }

    Ok(())
}

/// Picks the store category: explicit flag, then manifest entry, then default
fn resolve_category(explicit: Option<String>, jobs: &[BatchJob], batch_id: &str) -> String {
    explicit
        .or_else(|| {
            jobs.iter()
                .find(|job| job.batch_id == batch_id)
                .map(|job| job.category.clone())
        })
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

/// Print detailed batch information
fn print_batch_details(batch: &BatchObject) {
    let counts = batch.request_counts;

    println!("{}", "Batch Details".bold().underline());
    println!("  ID:           {}", batch.id);
    println!("  Status:       {}", colorize_status(batch.status));
    println!(
        "  Requests:     {}/{} completed, {} failed",
        counts.completed, counts.total, counts.failed
    );
    println!(
        "  Output file:  {}",
        batch.output_file().unwrap_or("-").cyan()
    );
    println!(
        "  Error file:   {}",
        batch.error_file_id.as_deref().unwrap_or("-")
    );
    println!("  Created:      {}", format_time(batch.created_at()).dimmed());
    println!(
        "  Completed:    {}",
        format_time(batch.completed_at()).dimmed()
    );
}

fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| {
        t.with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    })
    .unwrap_or_else(|| "-".to_string())
}
