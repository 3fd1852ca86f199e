//! POST /ingest — loads a local document into the note store.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::info;

use crate::core::app_state::AppState;
use crate::error_handler::AppResult;
use crate::routes::ingest::ingest_request::{IngestRequest, IngestResponse};

/// Handler: POST /ingest
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/ingest \
///   -H 'content-type: application/json' \
///   -d '{"path":"/home/me/notes/thermo.txt"}'
/// ```
pub async fn ingest(
    State(state): State<Arc<AppState>>,
    Json(body): Json<IngestRequest>,
) -> AppResult<Json<IngestResponse>> {
    let path = PathBuf::from(&body.path);
    let stats = state.notes.ingest_document(&path).await?;

    info!(path = %body.path, pages = stats.pages, "document ingested");

    Ok(Json(IngestResponse {
        ok: true,
        pages: stats.pages,
        path: body.path,
    }))
}
