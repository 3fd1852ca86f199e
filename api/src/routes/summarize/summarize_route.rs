//! POST /summarize, POST /summarize/start, GET /summarize/status/{job_id} —
//! synchronous and background summarization of all stored notes.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::{error, info};

use study_core::{SummaryMode, summarize_notes};

use crate::core::app_state::AppState;
use crate::error_handler::{AppError, AppResult};
use crate::routes::summarize::summarize_request::{
    SummaryRequest, SummaryResponse, SummaryStartResponse, SummaryStatusResponse,
};

/// Handler: POST /summarize (blocks until the summary is ready)
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/summarize \
///   -H 'content-type: application/json' \
///   -d '{"mode":"Brief"}'
/// ```
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SummaryRequest>,
) -> AppResult<Json<SummaryResponse>> {
    let mode = SummaryMode::from_label(&body.mode);
    let summary = summarize_notes(state.svc.as_ref(), state.notes.as_ref(), mode).await?;

    Ok(Json(SummaryResponse { ok: true, summary }))
}

/// Handler: POST /summarize/start
///
/// Accepts the request, spawns one detached worker, and returns a job id the
/// client can poll via /summarize/status/{job_id}.
pub async fn summarize_start(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SummaryRequest>,
) -> AppResult<Json<SummaryStartResponse>> {
    let mode = SummaryMode::from_label(&body.mode);
    let job_id = state.jobs.create().await;

    let jobs = state.jobs.clone();
    let svc = state.svc.clone();
    let notes = state.notes.clone();
    let id = job_id.clone();

    tokio::spawn(async move {
        match summarize_notes(svc.as_ref(), notes.as_ref(), mode).await {
            Ok(summary) => {
                info!(job_id = %id, "background summarization finished");
                jobs.complete(&id, summary).await;
            }
            Err(e) => {
                error!(job_id = %id, error = %e, "background summarization failed");
                jobs.fail(&id, e.to_string()).await;
            }
        }
    });

    Ok(Json(SummaryStartResponse { ok: true, job_id }))
}

/// Handler: GET /summarize/status/{job_id}
pub async fn summarize_status(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<String>,
) -> AppResult<Json<SummaryStatusResponse>> {
    match state.jobs.get(&job_id).await {
        Some(job) => Ok(Json(SummaryStatusResponse::from_job(&job))),
        None => Err(AppError::NotFound(format!("unknown job: {job_id}"))),
    }
}
