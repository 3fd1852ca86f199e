//! POST /doubt — answers a question from the notes (RAG) or refines the
//! previous answer.

use std::sync::Arc;

use axum::{Json, extract::State};

use study_core::doubt::solve_doubt;

use crate::core::app_state::AppState;
use crate::error_handler::AppResult;
use crate::routes::doubt::doubt_request::{DoubtRequest, DoubtResponse};

/// Handler: POST /doubt
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/doubt \
///   -H 'content-type: application/json' \
///   -d '{"question":"what is conduction?","last_answer":""}'
/// ```
pub async fn doubt(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DoubtRequest>,
) -> AppResult<Json<DoubtResponse>> {
    let answer = solve_doubt(
        state.svc.as_ref(),
        state.notes.as_ref(),
        &body.question,
        body.last_answer.as_deref().unwrap_or(""),
    )
    .await?;

    Ok(Json(DoubtResponse { ok: true, answer }))
}
