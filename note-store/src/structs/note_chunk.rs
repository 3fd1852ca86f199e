//! Data types for vector-store interaction: payload shape, search hits,
//! and ingestion statistics.

use serde::{Deserialize, Serialize};

/// Payload stored alongside the vector in Qdrant.
///
/// One payload per ingested page; `text` carries the full page body so
/// retrieval needs no second hydration pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkPayload {
    /// Full page text fed back to the LLM as context.
    pub text: String,
    /// Source document path the page came from.
    pub source: String,
    /// Zero-based page index within the source document.
    pub page: usize,
}

/// A single similarity-search hit (ranked by score, best first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkHit {
    pub score: f32,
    pub id: String,
    pub text: String,
    pub source: String,
    pub page: usize,
}

/// Summary statistics for one document ingestion.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct IngestStats {
    /// Number of page-level chunks written.
    pub pages: usize,
    pub duration_ms: u128,
}
