//! Background summary jobs behind a narrow create/get/complete/fail
//! interface.
//!
//! Each job is written by exactly one worker exactly once after creation.
//! Entries are kept for the lifetime of the process; there is no eviction.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

/// Terminal and in-flight states of a summary job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Processing,
    Done,
    Error,
}

/// One background summarization job.
#[derive(Debug, Clone)]
pub struct SummaryJob {
    pub status: JobStatus,
    /// Summary text when done, error message when failed, empty while
    /// processing.
    pub result: String,
}

/// Process-wide summary job table.
///
/// Callers never touch the map directly, so the store can later gain
/// eviction or persistence without touching them.
#[derive(Clone, Default)]
pub struct JobStore {
    inner: Arc<RwLock<HashMap<String, SummaryJob>>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new job in `processing` state and return its identifier.
    pub async fn create(&self) -> String {
        let id = services::uuid::new_job_id();
        self.inner.write().await.insert(
            id.clone(),
            SummaryJob {
                status: JobStatus::Processing,
                result: String::new(),
            },
        );
        id
    }

    /// Mark a job done with its summary text.
    pub async fn complete(&self, id: &str, summary: String) {
        self.set(id, JobStatus::Done, summary).await;
    }

    /// Mark a job failed with an error message.
    pub async fn fail(&self, id: &str, error: String) {
        self.set(id, JobStatus::Error, error).await;
    }

    /// Snapshot of a job, if it exists.
    pub async fn get(&self, id: &str) -> Option<SummaryJob> {
        self.inner.read().await.get(id).cloned()
    }

    async fn set(&self, id: &str, status: JobStatus, result: String) {
        if let Some(job) = self.inner.write().await.get_mut(id) {
            job.status = status;
            job.result = result;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn job_moves_from_processing_to_done() {
        let jobs = JobStore::new();
        let id = jobs.create().await;

        let job = jobs.get(&id).await.unwrap();
        assert_eq!(job.status, JobStatus::Processing);
        assert!(job.result.is_empty());

        jobs.complete(&id, "five bullets".into()).await;
        let job = jobs.get(&id).await.unwrap();
        assert_eq!(job.status, JobStatus::Done);
        assert_eq!(job.result, "five bullets");
    }

    #[tokio::test]
    async fn failed_job_keeps_the_error_message() {
        let jobs = JobStore::new();
        let id = jobs.create().await;
        jobs.fail(&id, "upstream broke".into()).await;

        let job = jobs.get(&id).await.unwrap();
        assert_eq!(job.status, JobStatus::Error);
        assert_eq!(job.result, "upstream broke");
    }

    #[tokio::test]
    async fn unknown_job_is_none_and_jobs_use_disjoint_keys() {
        let jobs = JobStore::new();
        assert!(jobs.get("missing").await.is_none());

        let a = jobs.create().await;
        let b = jobs.create().await;
        assert_ne!(a, b);
    }
}
