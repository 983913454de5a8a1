//! Batch resolution
//!
//! Maps a remote batch status document to what the monitor should do next.

use batchwatch_core::domain::batch::BatchStatus;
use batchwatch_core::dto::batch::BatchObject;

/// Next step for a watched batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Completed with output; forward the file to storage
    Store { file_id: String },
    /// Completed but produced no output file; nothing to store
    CompletedWithoutOutput,
    /// The batch API reported `failed`
    Failed,
    /// Still running, or in a status we do not act on (including `expired`
    /// and `cancelled`)
    Pending(BatchStatus),
}

/// Decides the next step for a batch from its status document
pub fn resolve(batch: &BatchObject) -> Resolution {
    match batch.status {
        BatchStatus::Completed => match batch.output_file() {
            Some(file_id) => Resolution::Store {
                file_id: file_id.to_string(),
            },
            None => Resolution::CompletedWithoutOutput,
        },
        BatchStatus::Failed => Resolution::Failed,
        status => Resolution::Pending(status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batchwatch_core::domain::batch::RequestCounts;

    fn batch(status: BatchStatus, output_file_id: Option<&str>) -> BatchObject {
        BatchObject {
            id: "batch_test".to_string(),
            status,
            output_file_id: output_file_id.map(str::to_string),
            error_file_id: None,
            request_counts: RequestCounts::default(),
            created_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn test_completed_with_output_is_stored() {
        assert_eq!(
            resolve(&batch(BatchStatus::Completed, Some("file-1"))),
            Resolution::Store {
                file_id: "file-1".to_string()
            }
        );
    }

    #[test]
    fn test_completed_without_output() {
        assert_eq!(
            resolve(&batch(BatchStatus::Completed, None)),
            Resolution::CompletedWithoutOutput
        );

        assert_eq!(
            resolve(&batch(BatchStatus::Completed, Some(""))),
            Resolution::CompletedWithoutOutput
        );
    }

    #[test]
    fn test_failed_is_resolved() {
        assert_eq!(resolve(&batch(BatchStatus::Failed, None)), Resolution::Failed);
    }

    #[test]
    fn test_other_statuses_stay_pending() {
        for status in [
            BatchStatus::Validating,
            BatchStatus::InProgress,
            BatchStatus::Finalizing,
            BatchStatus::Cancelling,
            BatchStatus::Expired,
            BatchStatus::Cancelled,
            BatchStatus::Unknown,
        ] {
            assert_eq!(resolve(&batch(status, None)), Resolution::Pending(status));
        }
    }

    #[test]
    fn test_output_file_ignored_unless_completed() {
        assert_eq!(
            resolve(&batch(BatchStatus::Finalizing, Some("file-1"))),
            Resolution::Pending(BatchStatus::Finalizing)
        );
        assert_eq!(
            resolve(&batch(BatchStatus::Expired, Some("file-1"))),
            Resolution::Pending(BatchStatus::Expired)
        );
    }
}
