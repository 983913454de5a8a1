//! Job manifest
//!
//! The list of batch jobs to watch. A builtin list is compiled in; a JSON
//! file with the same shape can replace it at startup:
//!
//! ```json
//! [
//!   { "batch_id": "batch_...", "type": "motion_quality", "description": "batch 1/8" }
//! ]
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::batch::BatchJob;

/// Result type alias for manifest operations
pub type Result<T> = std::result::Result<T, ManifestError>;

/// Errors raised while loading a job manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Manifest contains no jobs")]
    Empty,

    #[error("Manifest entry {0} has an empty batch_id")]
    EmptyId(usize),

    #[error("Duplicate batch_id in manifest: {0}")]
    Duplicate(String),
}

const BUILTIN: &[(&str, &str, &str)] = &[
    (
        "batch_68f7fda62de88190a104354ce9e736a4",
        "motion_quality",
        "1,000 motions batch 1/8",
    ),
    (
        "batch_68f7fdab79a08190a717fd998c3077a9",
        "motion_quality",
        "1,000 motions batch 2/8",
    ),
    (
        "batch_68f7fdb17e38819081a62178071310bb",
        "motion_quality",
        "1,000 motions batch 3/8",
    ),
    (
        "batch_68f7fdb7e41081909d9fca98f05c88a0",
        "motion_quality",
        "1,000 motions batch 4/8",
    ),
    (
        "batch_68f7fdbd7f908190955fc12e0fe31f83",
        "motion_quality",
        "1,000 motions batch 5/8",
    ),
    (
        "batch_68f7fdc3c8348190aec3d40bccf627af",
        "motion_quality",
        "1,000 motions batch 6/8",
    ),
    (
        "batch_68f7fdc9771c81909a7ef3a8993886c1",
        "motion_quality",
        "1,000 motions batch 7/8",
    ),
    (
        "batch_68f7fdceaf88819094496b4b825c7e35",
        "motion_quality",
        "1,000 motions batch 8/8",
    ),
];

/// The compiled-in job list, all entries pending
pub fn builtin_jobs() -> Vec<BatchJob> {
    BUILTIN
        .iter()
        .map(|(id, category, description)| BatchJob::new(*id, *category, *description))
        .collect()
}

/// Parses a manifest document
pub fn parse_manifest(content: &str) -> Result<Vec<BatchJob>> {
    let jobs: Vec<BatchJob> = serde_json::from_str(content)?;
    validate(&jobs)?;
    Ok(jobs)
}

/// Reads and parses a manifest file
pub fn load_manifest(path: &Path) -> Result<Vec<BatchJob>> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_manifest(&content)
}

/// Loads jobs from `path` when given, otherwise returns the builtin list
pub fn jobs_from_source(path: Option<&Path>) -> Result<Vec<BatchJob>> {
    match path {
        Some(path) => load_manifest(path),
        None => Ok(builtin_jobs()),
    }
}

fn validate(jobs: &[BatchJob]) -> Result<()> {
    if jobs.is_empty() {
        return Err(ManifestError::Empty);
    }

    let mut seen = HashSet::new();
    for (idx, job) in jobs.iter().enumerate() {
        if job.batch_id.trim().is_empty() {
            return Err(ManifestError::EmptyId(idx));
        }
        if !seen.insert(job.batch_id.as_str()) {
            return Err(ManifestError::Duplicate(job.batch_id.clone()));
        }
    }

    Ok(())
}
