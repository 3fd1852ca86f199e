//! Public API:
//! - [`NoteStore::ingest_document`]: load a file, split into pages, embed, upsert.
//! - [`NoteStore::retrieve`]: embed query, top-k vector search, return chunk texts.
//! - [`NoteStore::retrieve_all`]: bulk fetch of every stored chunk (scroll with
//!   a broad-search fallback), used by the notes summarizer.
//!
//! Retrieval is deliberately infallible at this surface: any upstream failure
//! is logged and degrades to an empty result, so callers can treat "no
//! context" uniformly.

pub mod config;
pub mod errors;
pub mod loader;
pub mod structs;
mod vector_db;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use qdrant_client::Qdrant;
use tracing::{info, warn};

use config::NoteStoreConfig;
use errors::note_store_error::NoteStoreError;
use llm_gateway::LlmServiceProfiles;
use structs::note_chunk::{ChunkHit, ChunkPayload, IngestStats};
use vector_db::{connect, ensure_collection, scroll_all, search_top_k, upsert_batch};

/// Hard upper bound for bulk fetches, applied to both the scroll path and
/// the broad-search fallback.
pub const MAX_BULK_CHUNKS: usize = 1000;

/// Facade over the persistent similarity-search index of note pages.
pub struct NoteStore {
    client: Qdrant,
    cfg: NoteStoreConfig,
    svc: Arc<LlmServiceProfiles>,
}

impl NoteStore {
    /// Connect to Qdrant and wrap the shared LLM profiles for embeddings.
    ///
    /// Does not touch any collection; the collection is created lazily on
    /// first ingestion.
    ///
    /// # Errors
    /// Returns [`NoteStoreError::Qdrant`] if the client cannot be built.
    pub fn new(cfg: NoteStoreConfig, svc: Arc<LlmServiceProfiles>) -> Result<Self, NoteStoreError> {
        let client = connect(&cfg)?;
        Ok(Self { client, cfg, svc })
    }

    /// Load a document from `path`, split it into page texts, embed each page
    /// and upsert the batch into the collection.
    ///
    /// Point ids are UUIDv5 values derived from `path#page`, so re-ingesting
    /// the same file overwrites its previous pages.
    ///
    /// # Errors
    /// - [`NoteStoreError::FileNotFound`] when the path does not exist
    /// - [`NoteStoreError::Embedding`] when the embedding backend fails
    /// - [`NoteStoreError::Qdrant`] on vector-store failures
    pub async fn ingest_document(&self, path: &Path) -> Result<IngestStats, NoteStoreError> {
        let started = Instant::now();
        let pages = loader::load_pages(path)?;
        let source = path.to_string_lossy().to_string();

        info!(
            source = %source,
            pages = pages.len(),
            "ingest_document: start"
        );

        ensure_collection(&self.client, &self.cfg).await?;

        let mut written = 0usize;
        for batch in pages.chunks(self.cfg.qdrant.batch_size.max(1)) {
            let mut points = Vec::with_capacity(batch.len());
            for (offset, text) in batch.iter().enumerate() {
                let page = written + offset;
                let vector = self.svc.embed(text).await?;
                let id = services::uuid::stable_uuid(&format!("{source}#{page}")).to_string();
                points.push((
                    id,
                    vector,
                    ChunkPayload {
                        text: text.clone(),
                        source: source.clone(),
                        page,
                    },
                ));
            }
            written += upsert_batch(&self.client, &self.cfg, points).await?;
        }

        let stats = IngestStats {
            pages: written,
            duration_ms: started.elapsed().as_millis(),
        };

        info!(
            source = %source,
            pages = stats.pages,
            duration_ms = stats.duration_ms,
            "ingest_document: finished"
        );

        Ok(stats)
    }

    /// Return the top-`k` most similar stored chunk texts for `query`,
    /// most relevant first. Logs and returns an empty list on any failure.
    pub async fn retrieve(&self, query: &str, k: usize) -> Vec<String> {
        match self.try_retrieve(query, k).await {
            Ok(texts) => texts,
            Err(e) => {
                warn!(error = %e, query, "retrieve failed; returning empty context");
                Vec::new()
            }
        }
    }

    /// Bulk-fetch every stored chunk text, capped at [`MAX_BULK_CHUNKS`].
    ///
    /// Scrolls the collection first; if scrolling fails, falls back to an
    /// extremely broad similarity query. Returns an empty list when both
    /// paths fail.
    pub async fn retrieve_all(&self) -> Vec<String> {
        match scroll_all(&self.client, &self.cfg, MAX_BULK_CHUNKS).await {
            Ok(hits) => hits.into_iter().map(|h| h.text).collect(),
            Err(e) => {
                warn!(error = %e, "scroll failed; falling back to broad similarity search");
                match self.try_retrieve(" ", MAX_BULK_CHUNKS).await {
                    Ok(texts) => texts,
                    Err(e) => {
                        warn!(error = %e, "broad similarity fallback failed; returning empty");
                        Vec::new()
                    }
                }
            }
        }
    }

    /* --------------------- Internals --------------------- */

    async fn try_retrieve(&self, query: &str, k: usize) -> Result<Vec<String>, NoteStoreError> {
        let vector = self.svc.embed(query).await?;
        let hits: Vec<ChunkHit> = search_top_k(&self.client, &self.cfg, vector, k).await?;
        Ok(hits.into_iter().map(|h| h.text).collect())
    }
}
