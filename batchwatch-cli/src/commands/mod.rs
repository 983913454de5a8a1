//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod batch;
mod jobs;
mod status;

use anyhow::Result;
use batchwatch_core::domain::batch::BatchStatus;
use clap::Subcommand;
use colored::*;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List the watched batch jobs
    Jobs,
    /// Check every watched batch once and print a summary
    Status,
    /// Show the full status of one batch
    Get {
        /// Batch ID
        batch_id: String,
    },
    /// Forward a completed batch's results to storage
    Store {
        /// Batch ID
        batch_id: String,

        /// Result category sent to storage (defaults to the manifest entry,
        /// then "motion_quality")
        #[arg(long)]
        category: Option<String>,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Jobs => jobs::list_jobs(config),
        Commands::Status => status::check_all(config).await,
        Commands::Get { batch_id } => batch::get_batch(config, &batch_id).await,
        Commands::Store { batch_id, category } => {
            batch::store_batch(config, &batch_id, category).await
        }
    }
}

/// Colorize a batch status for display
fn colorize_status(status: BatchStatus) -> ColoredString {
    let status_str = status.as_str();
    match status {
        BatchStatus::Completed => status_str.green(),
        BatchStatus::InProgress | BatchStatus::Finalizing => status_str.yellow(),
        BatchStatus::Validating | BatchStatus::Cancelling => status_str.blue(),
        BatchStatus::Failed | BatchStatus::Expired | BatchStatus::Cancelled => status_str.red(),
        BatchStatus::Unknown => status_str.dimmed(),
    }
}
