//! Batch domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// A batch job being watched
///
/// Entries are created once at startup and live for the whole process.
/// Only `state` changes, and only from `Pending` to a resolved state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchJob {
    pub batch_id: String,
    #[serde(rename = "type")]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(skip)]
    pub state: JobState,
}

impl BatchJob {
    pub fn new(
        batch_id: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            batch_id: batch_id.into(),
            category: category.into(),
            description: description.into(),
            state: JobState::Pending,
        }
    }

    /// True once the job needs no further polling
    pub fn is_resolved(&self) -> bool {
        self.state.is_resolved()
    }

    /// Last eight characters of the batch id, for compact log lines
    pub fn short_id(&self) -> &str {
        let len = self.batch_id.len();
        match self.batch_id.char_indices().nth_back(7) {
            Some((idx, _)) if len > 8 => &self.batch_id[idx..],
            _ => &self.batch_id,
        }
    }
}

/// Local state of a watched job
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobState {
    /// Not yet resolved; polled again on the next tick
    #[default]
    Pending,
    /// Completed remotely and forwarded to storage
    Stored,
    /// Resolved without storing anything
    Failed,
}

impl JobState {
    pub fn is_resolved(self) -> bool {
        !matches!(self, JobState::Pending)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobState::Pending => "pending",
            JobState::Stored => "stored",
            JobState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Status reported by the remote batch API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Validating,
    InProgress,
    Finalizing,
    Completed,
    Failed,
    Expired,
    Cancelling,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl BatchStatus {
    /// Statuses of a batch that stopped without completing
    ///
    /// Only used for reporting; the monitor keeps polling `expired` and
    /// `cancelled` batches.
    pub fn is_terminal_failure(self) -> bool {
        matches!(
            self,
            BatchStatus::Failed | BatchStatus::Expired | BatchStatus::Cancelled
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BatchStatus::Validating => "validating",
            BatchStatus::InProgress => "in_progress",
            BatchStatus::Finalizing => "finalizing",
            BatchStatus::Completed => "completed",
            BatchStatus::Failed => "failed",
            BatchStatus::Expired => "expired",
            BatchStatus::Cancelling => "cancelling",
            BatchStatus::Cancelled => "cancelled",
            BatchStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-request progress counters of a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestCounts {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub failed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_job_is_pending() {
        let job = BatchJob::new("batch_abc", "motion_quality", "test batch");
        assert_eq!(job.state, JobState::Pending);
        assert!(!job.is_resolved());
    }

    #[test]
    fn test_resolved_states() {
        assert!(!JobState::Pending.is_resolved());
        assert!(JobState::Stored.is_resolved());
        assert!(JobState::Failed.is_resolved());
    }

    #[test]
    fn test_short_id() {
        let job = BatchJob::new("batch_68f7fda62de88190a104354ce9e736a4", "t", "d");
        assert_eq!(job.short_id(), "e9e736a4");

        let short = BatchJob::new("abc", "t", "d");
        assert_eq!(short.short_id(), "abc");
    }

    #[test]
    fn test_status_deserialization() {
        let status: BatchStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(status, BatchStatus::InProgress);

        let status: BatchStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(status, BatchStatus::Completed);

        let status: BatchStatus = serde_json::from_str("\"something_new\"").unwrap();
        assert_eq!(status, BatchStatus::Unknown);
    }

    #[test]
    fn test_terminal_failures() {
        assert!(BatchStatus::Failed.is_terminal_failure());
        assert!(BatchStatus::Expired.is_terminal_failure());
        assert!(BatchStatus::Cancelled.is_terminal_failure());
        assert!(!BatchStatus::Cancelling.is_terminal_failure());
        assert!(!BatchStatus::InProgress.is_terminal_failure());
        assert!(!BatchStatus::Completed.is_terminal_failure());
    }

    #[test]
    fn test_job_serializes_category_as_type() {
        let job = BatchJob::new("batch_1", "motion_quality", "first");
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["type"], "motion_quality");
        assert!(value.get("state").is_none());
    }
}
