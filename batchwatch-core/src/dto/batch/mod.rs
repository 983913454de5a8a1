//! Batch API DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::batch::{BatchStatus, RequestCounts};

/// Status document returned by `GET /batches/{id}`
///
/// Only the fields the monitor reads are modelled; everything else in the
/// remote document is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchObject {
    #[serde(default)]
    pub id: String,
    pub status: BatchStatus,
    #[serde(default)]
    pub output_file_id: Option<String>,
    #[serde(default)]
    pub error_file_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub request_counts: RequestCounts,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub completed_at: Option<i64>,
}

impl BatchObject {
    /// Output file id, treating an empty string as absent
    pub fn output_file(&self) -> Option<&str> {
        self.output_file_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }
}

/// Reads an explicit `null` as the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
