//! Status command
//!
//! Checks every watched batch once and prints per-batch progress plus totals.

use anyhow::Result;
use batchwatch_core::domain::batch::{BatchStatus, RequestCounts};
use colored::*;

use super::colorize_status;
use crate::config::Config;

/// Running totals over the checked batches
#[derive(Debug, Default, PartialEq, Eq)]
struct StatusTally {
    completed: usize,
    in_progress: usize,
    failed: usize,
    other: usize,
    unreadable: usize,
    requests_done: u64,
    requests_total: u64,
}

impl StatusTally {
    fn record(&mut self, status: BatchStatus, counts: RequestCounts) {
        match status {
            BatchStatus::Completed => self.completed += 1,
            BatchStatus::InProgress | BatchStatus::Finalizing => self.in_progress += 1,
            s if s.is_terminal_failure() => self.failed += 1,
            _ => self.other += 1,
        }
        self.requests_done += counts.completed;
        self.requests_total += counts.total;
    }

    fn record_unreadable(&mut self) {
        self.unreadable += 1;
    }

    fn progress_percent(&self) -> f64 {
        if self.requests_total == 0 {
            return 0.0;
        }
        self.requests_done as f64 * 100.0 / self.requests_total as f64
    }
}

/// Check every watched batch once
pub async fn check_all(config: &Config) -> Result<()> {
    let client = config.batch_client()?;
    let jobs = config.jobs()?;

    println!("{}", format!("Checking {} batch(es)...", jobs.len()).bold());
    println!();

    let mut tally = StatusTally::default();

    for (idx, job) in jobs.iter().enumerate() {
        let prefix = format!("[{}/{}]", idx + 1, jobs.len());

        match client.get_batch(&job.batch_id, config.status_timeout).await {
            Ok(batch) => {
                let counts = batch.request_counts;
                println!(
                    "  {} {} {}",
                    prefix.dimmed(),
                    job.description.bold(),
                    colorize_status(batch.status)
                );
                println!(
                    "      {}/{} completed, {} failed",
                    counts.completed, counts.total, counts.failed
                );
                tally.record(batch.status, counts);
            }
            Err(e) => {
                println!(
                    "  {} {} {}",
                    prefix.dimmed(),
                    job.description.bold(),
                    format!("error: {}", e).red()
                );
                tally.record_unreadable();
            }
        }
    }

    println!();
    println!("{}", "Summary".bold());
    println!("  Completed:    {}", tally.completed.to_string().green());
    println!("  In progress:  {}", tally.in_progress.to_string().yellow());
    println!("  Failed:       {}", tally.failed.to_string().red());
    println!("  Other:        {}", tally.other);
    if tally.unreadable > 0 {
        println!("  Unreadable:   {}", tally.unreadable.to_string().red());
    }
    println!(
        "  Requests:     {}/{} ({:.1}%)",
        tally.requests_done,
        tally.requests_total,
        tally.progress_percent()
    );

    Ok(())
}
