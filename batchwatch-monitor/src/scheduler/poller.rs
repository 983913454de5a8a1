//! Batch monitor
//!
//! Checks every unresolved batch job once per tick, forwards completed
//! results to storage and stops when every job is resolved. Jobs are checked
//! one after another; at most one request is in flight at any time.

use batchwatch_core::domain::batch::{BatchJob, JobState};
use batchwatch_core::dto::store::StoreStats;
use std::sync::Arc;
use tokio::time::{self, Duration};
use tracing::{debug, error, info, warn};

use crate::repository::{BatchRepository, ResultRepository};
use crate::service::{Resolution, resolve};

/// Outcome of a single pass over the job list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub iteration: u64,
    /// Jobs stored during this pass
    pub stored: usize,
    /// Jobs resolved without storing during this pass
    pub failed: usize,
    /// Jobs still unresolved after this pass
    pub pending: usize,
}

/// Totals reported once every job is resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorSummary {
    pub checks: u64,
    pub stored: usize,
    pub failed: usize,
    /// Rows the storage endpoint reported as stored
    pub rows_stored: u64,
    /// Rows the storage endpoint reported as failed
    pub rows_failed: u64,
}

/// Result of checking one job
struct Evaluation {
    state: JobState,
    stats: Option<StoreStats>,
}

impl Evaluation {
    fn pending() -> Self {
        Self {
            state: JobState::Pending,
            stats: None,
        }
    }
}

/// Watches a fixed list of batch jobs until all of them are resolved
pub struct BatchMonitor {
    jobs: Vec<BatchJob>,
    batches: Arc<dyn BatchRepository>,
    results: Arc<dyn ResultRepository>,
    poll_interval: Duration,
    iteration: u64,
    rows_stored: u64,
    rows_failed: u64,
}

impl BatchMonitor {
    /// Creates a new batch monitor
    ///
    /// # Arguments
    /// * `jobs` - Jobs to watch; already-resolved entries are never polled
    /// * `batches` - Source of batch status documents
    /// * `results` - Destination for completed results
    /// * `poll_interval` - Fixed wait between two checks
    pub fn new(
        jobs: Vec<BatchJob>,
        batches: Arc<dyn BatchRepository>,
        results: Arc<dyn ResultRepository>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            jobs,
            batches,
            results,
            poll_interval,
            iteration: 0,
            rows_stored: 0,
            rows_failed: 0,
        }
    }

    /// The watched jobs with their current state
    pub fn jobs(&self) -> &[BatchJob] {
        &self.jobs
    }

    /// True once no job is pending
    pub fn all_resolved(&self) -> bool {
        self.jobs.iter().all(BatchJob::is_resolved)
    }

    /// Runs checks until every job is resolved
    ///
    /// The first check runs immediately; later checks follow the poll
    /// interval. Per-job failures never end the loop.
    pub async fn run(&mut self) -> MonitorSummary {
        info!(
            "Monitoring {} batch job(s) (interval: {:?})",
            self.jobs.len(),
            self.poll_interval
        );

        loop {
            let report = self.check_once().await;

            if self.all_resolved() {
                info!(
                    "All batch jobs resolved after {} check(s)",
                    report.iteration
                );
                return self.summary();
            }

            info!(
                "Waiting {:?} until next check ({} job(s) pending)",
                self.poll_interval, report.pending
            );
            time::sleep(self.poll_interval).await;
        }
    }

    /// Performs a single pass over every unresolved job
    pub async fn check_once(&mut self) -> CycleReport {
        self.iteration += 1;

        let mut report = CycleReport {
            iteration: self.iteration,
            ..Default::default()
        };

        info!("Check #{}", self.iteration);

        for idx in 0..self.jobs.len() {
            if self.jobs[idx].is_resolved() {
                continue;
            }

            let evaluation = self.evaluate(&self.jobs[idx]).await;

            if let Some(stats) = evaluation.stats {
                self.rows_stored += stats.stored;
                self.rows_failed += stats.failed;
            }

            self.jobs[idx].state = evaluation.state;

            match evaluation.state {
                JobState::Stored => report.stored += 1,
                JobState::Failed => report.failed += 1,
                JobState::Pending => report.pending += 1,
            }
        }

        info!(
            "Summary: {} stored, {} failed this check, {} still pending",
            report.stored, report.failed, report.pending
        );

        report
    }

    /// Checks one job and performs the store call when it is due
    async fn evaluate(&self, job: &BatchJob) -> Evaluation {
        let batch = match self.batches.fetch_status(&job.batch_id).await {
            Ok(batch) => batch,
            Err(e) => {
                error!("{}: {:#}", job.description, e);
                return Evaluation::pending();
            }
        };

        let counts = batch.request_counts;

        match resolve(&batch) {
            Resolution::Store { file_id } => {
                info!(
                    "{} completed ({}/{} succeeded), storing results",
                    job.description, counts.completed, counts.total
                );

                match self.results.store(job, &file_id).await {
                    Ok(response) => {
                        info!(
                            "{} stored: {} row(s), {} failed",
                            job.description, response.stats.stored, response.stats.failed
                        );
                        Evaluation {
                            state: JobState::Stored,
                            stats: Some(response.stats),
                        }
                    }
                    Err(e) => {
                        error!("{}: {:#}", job.description, e);
                        Evaluation::pending()
                    }
                }
            }
            Resolution::CompletedWithoutOutput => {
                warn!("{} completed but has no output file", job.description);
                Evaluation {
                    state: JobState::Failed,
                    stats: None,
                }
            }
            Resolution::Failed => {
                error!("{} failed", job.description);
                Evaluation {
                    state: JobState::Failed,
                    stats: None,
                }
            }
            Resolution::Pending(status) => {
                info!(
                    "{} is {} ({}/{} completed)",
                    job.description, status, counts.completed, counts.total
                );
                debug!("Batch {} left pending", job.short_id());
                Evaluation::pending()
            }
        }
    }

    fn summary(&self) -> MonitorSummary {
        let (stored, failed) = self
            .jobs
            .iter()
            .fold((0, 0), |(stored, failed), job| match job.state {
                JobState::Stored => (stored + 1, failed),
                JobState::Failed => (stored, failed + 1),
                JobState::Pending => (stored, failed),
            });

        MonitorSummary {
            checks: self.iteration,
            stored,
            failed,
            rows_stored: self.rows_stored,
            rows_failed: self.rows_failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use batchwatch_core::domain::batch::{BatchStatus, RequestCounts};
    use batchwatch_core::dto::batch::BatchObject;
    use batchwatch_core::dto::store::StoreResponse;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    /// Replays a scripted sequence of status answers per batch.
    /// `None` stands for a failed request. The last answer repeats.
    #[derive(Default)]
    struct ScriptedBatches {
        scripts: Mutex<HashMap<String, VecDeque<Option<BatchObject>>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedBatches {
        fn script(self, batch_id: &str, answers: Vec<Option<(BatchStatus, Option<&str>)>>) -> Self {
            let answers = answers
                .into_iter()
                .map(|a| a.map(|(status, file)| batch(batch_id, status, file)))
                .collect();
            self.scripts
                .lock()
                .unwrap()
                .insert(batch_id.to_string(), answers);
            self
        }

        fn calls_for(&self, batch_id: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|id| id.as_str() == batch_id)
                .count()
        }
    }

    #[async_trait]
    impl BatchRepository for ScriptedBatches {
        async fn fetch_status(&self, batch_id: &str) -> Result<BatchObject> {
            self.calls.lock().unwrap().push(batch_id.to_string());

            let mut scripts = self.scripts.lock().unwrap();
            let answers = scripts
                .get_mut(batch_id)
                .ok_or_else(|| anyhow::anyhow!("no script for {}", batch_id))?;

            let answer = if answers.len() > 1 {
                answers.pop_front().flatten()
            } else {
                answers.front().cloned().flatten()
            };

            answer.ok_or_else(|| anyhow::anyhow!("connection reset"))
        }
    }

    /// Records store calls; fails the first `failures` of them
    #[derive(Default)]
    struct RecordingResults {
        calls: Mutex<Vec<(String, String)>>,
        failures: Mutex<usize>,
    }

    impl RecordingResults {
        fn failing(failures: usize) -> Self {
            Self {
                failures: Mutex::new(failures),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ResultRepository for RecordingResults {
        async fn store(&self, job: &BatchJob, file_id: &str) -> Result<StoreResponse> {
            self.calls
                .lock()
                .unwrap()
                .push((job.batch_id.clone(), file_id.to_string()));

            let mut failures = self.failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                anyhow::bail!("storage unavailable");
            }

            Ok(StoreResponse {
                success: Some(true),
                stats: StoreStats {
                    total: 10,
                    stored: 9,
                    failed: 1,
                    skipped: 0,
                },
                ..Default::default()
            })
        }
    }

    fn batch(id: &str, status: BatchStatus, output_file_id: Option<&str>) -> BatchObject {
        BatchObject {
            id: id.to_string(),
            status,
            output_file_id: output_file_id.map(str::to_string),
            error_file_id: None,
            request_counts: RequestCounts {
                total: 10,
                completed: 4,
                failed: 0,
            },
            created_at: None,
            completed_at: None,
        }
    }

    fn job(id: &str) -> BatchJob {
        BatchJob::new(id, "motion_quality", format!("job {}", id))
    }

    fn monitor(
        jobs: Vec<BatchJob>,
        batches: Arc<ScriptedBatches>,
        results: Arc<RecordingResults>,
    ) -> BatchMonitor {
        BatchMonitor::new(jobs, batches, results, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_completed_with_output_is_stored() {
        let batches = Arc::new(
            ScriptedBatches::default()
                .script("batch_a", vec![Some((BatchStatus::Completed, Some("file-a")))]),
        );
        let results = Arc::new(RecordingResults::default());
        let mut monitor = monitor(vec![job("batch_a")], batches, results.clone());

        let report = monitor.check_once().await;

        assert_eq!(report.stored, 1);
        assert_eq!(report.pending, 0);
        assert_eq!(monitor.jobs()[0].state, JobState::Stored);
        assert_eq!(
            results.calls(),
            vec![("batch_a".to_string(), "file-a".to_string())]
        );
    }

    #[tokio::test]
    async fn test_failed_resolves_without_store() {
        let batches = Arc::new(
            ScriptedBatches::default().script("batch_a", vec![Some((BatchStatus::Failed, None))]),
        );
        let results = Arc::new(RecordingResults::default());
        let mut monitor = monitor(vec![job("batch_a")], batches, results.clone());

        let report = monitor.check_once().await;

        assert_eq!(report.failed, 1);
        assert_eq!(monitor.jobs()[0].state, JobState::Failed);
        assert!(monitor.jobs()[0].is_resolved());
        assert!(results.calls().is_empty());
    }

    #[tokio::test]
    async fn test_completed_without_output_resolves_without_store() {
        let batches = Arc::new(
            ScriptedBatches::default()
                .script("batch_a", vec![Some((BatchStatus::Completed, None))]),
        );
        let results = Arc::new(RecordingResults::default());
        let mut monitor = monitor(vec![job("batch_a")], batches, results.clone());

        monitor.check_once().await;

        assert_eq!(monitor.jobs()[0].state, JobState::Failed);
        assert!(results.calls().is_empty());
    }

    #[tokio::test]
    async fn test_in_progress_and_unreadable_stay_pending() {
        let batches = Arc::new(
            ScriptedBatches::default()
                .script("batch_a", vec![Some((BatchStatus::InProgress, None))])
                .script("batch_b", vec![None])
                .script("batch_c", vec![Some((BatchStatus::Unknown, None))]),
        );
        let results = Arc::new(RecordingResults::default());
        let mut monitor = monitor(
            vec![job("batch_a"), job("batch_b"), job("batch_c")],
            batches,
            results.clone(),
        );

        let report = monitor.check_once().await;

        assert_eq!(report.pending, 3);
        assert!(monitor.jobs().iter().all(|j| j.state == JobState::Pending));
        assert!(!monitor.all_resolved());
        assert!(results.calls().is_empty());
    }

    #[tokio::test]
    async fn test_expired_and_cancelled_keep_polling() {
        let batches = Arc::new(
            ScriptedBatches::default()
                .script("batch_a", vec![Some((BatchStatus::Expired, Some("file-a")))])
                .script("batch_b", vec![Some((BatchStatus::Cancelled, None))]),
        );
        let results = Arc::new(RecordingResults::default());
        let mut monitor = monitor(
            vec![job("batch_a"), job("batch_b")],
            batches.clone(),
            results.clone(),
        );

        monitor.check_once().await;
        let report = monitor.check_once().await;

        assert_eq!(report.pending, 2);
        assert!(monitor.jobs().iter().all(|j| j.state == JobState::Pending));
        assert_eq!(batches.calls_for("batch_a"), 2);
        assert_eq!(batches.calls_for("batch_b"), 2);
        assert!(results.calls().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_retries_next_check() {
        let batches = Arc::new(
            ScriptedBatches::default()
                .script("batch_a", vec![Some((BatchStatus::Completed, Some("file-a")))]),
        );
        let results = Arc::new(RecordingResults::failing(1));
        let mut monitor = monitor(vec![job("batch_a")], batches, results.clone());

        let first = monitor.check_once().await;
        assert_eq!(first.pending, 1);
        assert_eq!(monitor.jobs()[0].state, JobState::Pending);

        let second = monitor.check_once().await;
        assert_eq!(second.iteration, 2);
        assert_eq!(second.stored, 1);
        assert_eq!(monitor.jobs()[0].state, JobState::Stored);
        assert_eq!(results.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_resolved_jobs_are_not_polled_again() {
        let batches = Arc::new(
            ScriptedBatches::default()
                .script("batch_a", vec![Some((BatchStatus::Failed, None))])
                .script("batch_b", vec![Some((BatchStatus::InProgress, None))]),
        );
        let results = Arc::new(RecordingResults::default());
        let mut monitor = monitor(
            vec![job("batch_a"), job("batch_b")],
            batches.clone(),
            results,
        );

        monitor.check_once().await;
        monitor.check_once().await;
        monitor.check_once().await;

        assert_eq!(batches.calls_for("batch_a"), 1);
        assert_eq!(batches.calls_for("batch_b"), 3);
    }

    #[tokio::test]
    async fn test_run_stops_when_all_resolved() {
        let batches = Arc::new(
            ScriptedBatches::default()
                .script(
                    "batch_a",
                    vec![
                        Some((BatchStatus::InProgress, None)),
                        None,
                        Some((BatchStatus::Completed, Some("file-a"))),
                    ],
                )
                .script("batch_b", vec![Some((BatchStatus::Failed, None))]),
        );
        let results = Arc::new(RecordingResults::default());
        let mut monitor = monitor(
            vec![job("batch_a"), job("batch_b")],
            batches.clone(),
            results.clone(),
        );

        let summary = monitor.run().await;

        assert_eq!(summary.checks, 3);
        assert_eq!(summary.stored, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.rows_stored, 9);
        assert_eq!(summary.rows_failed, 1);
        assert!(monitor.all_resolved());
        assert_eq!(batches.calls_for("batch_a"), 3);
        assert_eq!(batches.calls_for("batch_b"), 1);
        assert_eq!(results.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_run_with_all_jobs_resolved_checks_once() {
        let mut done = job("batch_a");
        done.state = JobState::Stored;

        let batches = Arc::new(ScriptedBatches::default());
        let results = Arc::new(RecordingResults::default());
        let mut monitor = monitor(vec![done], batches.clone(), results);

        let summary = monitor.run().await;

        assert_eq!(summary.checks, 1);
        assert_eq!(summary.stored, 1);
        assert_eq!(batches.calls_for("batch_a"), 0);
    }
}
