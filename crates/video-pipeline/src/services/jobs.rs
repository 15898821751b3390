use db::RecordStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::JobServiceError;
use crate::models::{JOB_COLLECTION, JobDocument, JobStatus, VideoJob};

pub const DEFAULT_LIST_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedJob {
    pub id: String,
    pub status: JobStatus,
}

/// Direct create/list over stored jobs. Unlike the pipeline, store failures
/// are returned to the caller.
#[derive(Clone)]
pub struct JobService {
    store: RecordStore,
}

impl JobService {
    pub const fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Stores `job` as given. The trigger phrase is not checked here.
    pub async fn create_job(&self, job: VideoJob) -> Result<CreatedJob, JobServiceError> {
        let id = self.store.insert(JOB_COLLECTION, &job).await.map_err(|e| {
            error!("Failed to create job for topic {}: {}", job.topic, e);
            e
        })?;
        info!("Created job {} with status {}", id, job.status);

        Ok(CreatedJob {
            id,
            status: job.status,
        })
    }

    /// Lists stored jobs, newest first. Records that no longer decode as a job
    /// are logged and left out.
    pub async fn list_jobs(&self, limit: usize) -> Result<Vec<JobDocument>, JobServiceError> {
        let records = self.store.list(JOB_COLLECTION, limit).await.map_err(|e| {
            error!("Failed to list jobs: {}", e);
            e
        })?;

        let mut jobs = Vec::with_capacity(records.len());
        for record in records.into_iter().take(limit) {
            let id = record
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            match serde_json::from_value(Value::Object(record)) {
                Ok(job) => jobs.push(job),
                Err(e) => warn!("Skipping stored job {} that could not be decoded: {}", id, e),
            }
        }

        Ok(jobs)
    }
}
