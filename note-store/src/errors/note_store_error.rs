//! Unified error type for the note-store crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the note store.
#[derive(Debug, Error)]
pub enum NoteStoreError {
    // ── Configuration / environment ──────────────────────────────────────────
    /// Failed to parse an environment variable into the expected type.
    #[error("failed to parse env variable: {key} = '{value}'")]
    EnvParse { key: String, value: String },

    /// Configuration combination is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Document loading ────────────────────────────────────────────────────
    /// Requested document path does not exist.
    #[error("document not found: {0}")]
    FileNotFound(PathBuf),

    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // ── JSON / serialization ────────────────────────────────────────────────
    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Qdrant client / transport ───────────────────────────────────────────
    /// Transport / client error from Qdrant.
    #[error("qdrant error: {0}")]
    Qdrant(String),

    // ── Embeddings backend ──────────────────────────────────────────────────
    /// Embedding backend failed to embed an input.
    #[error("embedding error: {0}")]
    Embedding(#[from] llm_gateway::LlmError),
}
