//! HTTP surface of the study-buddy backend.
//!
//! JSON over axum: document ingestion, quiz generation, doubt solving, and
//! synchronous plus background summarization.

use std::{env, sync::Arc};

mod core;
pub mod error_handler;
mod routes;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tracing::info;

use crate::core::app_state::AppState;
use crate::error_handler::AppError;
use crate::routes::{
    doubt::doubt_route::doubt,
    health_route::health,
    ingest::ingest_route::ingest,
    quiz::quiz_route::quiz,
    summarize::summarize_route::{summarize, summarize_start, summarize_status},
};

pub async fn start() -> Result<(), AppError> {
    let state = Arc::new(AppState::from_env()?);

    let app = Router::new()
        .route("/health", get(health))
        .route("/ingest", post(ingest))
        .route("/quiz", post(quiz))
        .route("/doubt", post(doubt))
        .route("/summarize", post(summarize))
        .route("/summarize/start", post(summarize_start))
        .route("/summarize/status/{job_id}", get(summarize_status))
        .with_state(state);

    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8000".into());

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;

    info!(addr = %host_url, "study-buddy backend listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
}
