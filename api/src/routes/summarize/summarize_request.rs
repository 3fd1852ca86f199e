use serde::{Deserialize, Serialize};

use crate::core::jobs::{JobStatus, SummaryJob};

fn default_mode() -> String {
    "Detailed".to_string()
}

/// Request payload for /summarize and /summarize/start.
#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    /// "Brief" or "Detailed" (lenient: any label starting with "brief"
    /// selects the brief summary).
    #[serde(default = "default_mode")]
    pub mode: String,
}

/// Response payload for /summarize (synchronous variant).
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub ok: bool,
    pub summary: String,
}

/// Response payload for /summarize/start.
#[derive(Debug, Serialize)]
pub struct SummaryStartResponse {
    pub ok: bool,
    pub job_id: String,
}

/// Response payload for /summarize/status/{job_id}.
#[derive(Debug, Serialize)]
pub struct SummaryStatusResponse {
    pub ok: bool,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SummaryStatusResponse {
    pub fn from_job(job: &SummaryJob) -> Self {
        let (summary, error) = match job.status {
            JobStatus::Done => (Some(job.result.clone()), None),
            JobStatus::Error => (None, Some(job.result.clone())),
            JobStatus::Processing => (None, None),
        };
        Self {
            ok: true,
            status: job.status,
            summary,
            error,
        }
    }
}
