//! Qdrant vector DB helpers: connection lifecycle, collection bootstrap,
//! batched upserts, top-K search, and full-collection scrolling using the
//! **modern** `qdrant_client` API.
//!
//! ## Why this module?
//! Keep the vector-store concerns isolated and easy to replace:
//! - Connect to Qdrant over gRPC (`qdrant_client::Qdrant`).
//! - Ensure the collection exists with the right dim/metric (ingestion
//!   appends; the collection is never dropped here).
//! - Upsert points in batches (UUID ids + dense vector + payload).
//! - Perform k-NN search returning page texts.
//! - Scroll the whole collection page by page for bulk reads.
//!
//! This module does **not** load documents or create embeddings — only DB I/O.
//!
//! ## Public API
//! - [`connect`] → `Qdrant`
//! - [`ensure_collection`] → create collection when missing
//! - [`upsert_batch`] → write `(id, vector, payload)`
//! - [`search_top_k`] → return text-bearing hits
//! - [`scroll_all`] → bulk fetch up to a caller-provided cap

use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, ScrollPointsBuilder, SearchPointsBuilder,
    VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use serde_json::json;
use tracing::debug;

use crate::config::{DistanceMetric, NoteStoreConfig};
use crate::errors::note_store_error::NoteStoreError;
use crate::structs::note_chunk::{ChunkHit, ChunkPayload};

/// Establish a gRPC connection to Qdrant using `cfg.qdrant.url`.
///
/// This call **does not** touch any collections.
///
/// # Errors
/// Returns `NoteStoreError::Qdrant` if the client cannot be constructed.
pub fn connect(cfg: &NoteStoreConfig) -> Result<Qdrant, NoteStoreError> {
    Qdrant::from_url(&cfg.qdrant.url)
        .build()
        .map_err(|e| NoteStoreError::Qdrant(format!("client build: {e}")))
}

/// Create the collection with the configured vector size and distance if it
/// does not exist yet. Existing collections are left untouched so repeated
/// ingestions accumulate pages.
///
/// # Errors
/// Returns `NoteStoreError::Qdrant` on transport/server failures.
pub async fn ensure_collection(client: &Qdrant, cfg: &NoteStoreConfig) -> Result<(), NoteStoreError> {
    let exists = client
        .collection_exists(&cfg.qdrant.collection)
        .await
        .map_err(|e| NoteStoreError::Qdrant(format!("collection_exists: {e}")))?;
    if exists {
        return Ok(());
    }

    let distance = match cfg.qdrant.distance {
        DistanceMetric::Cosine => Distance::Cosine,
        DistanceMetric::Dot => Distance::Dot,
        DistanceMetric::Euclid => Distance::Euclid,
    };

    client
        .create_collection(
            CreateCollectionBuilder::new(&cfg.qdrant.collection)
                .vectors_config(VectorParamsBuilder::new(cfg.embedding_dim as u64, distance)),
        )
        .await
        .map_err(|e| NoteStoreError::Qdrant(format!("create_collection: {e}")))?;

    debug!(
        collection = %cfg.qdrant.collection,
        dim = cfg.embedding_dim,
        "created collection"
    );

    Ok(())
}

/// Convert our lightweight [`ChunkPayload`] to Qdrant [`Payload`].
///
/// We serialize to JSON and then `try_into()` → `Payload` as recommended by
/// the client.
fn payload_to_qdrant(payload: &ChunkPayload) -> Result<Payload, NoteStoreError> {
    let as_json = json!({
        "text": payload.text,
        "source": payload.source,
        "page": payload.page,
    });
    as_json
        .try_into()
        .map_err(|e| NoteStoreError::Qdrant(format!("payload convert: {e}")))
}

/// Upsert a batch of points: `(point_id, vector, payload)`.
///
/// The vector **length must equal** `cfg.embedding_dim`.
///
/// Returns the number of upserted points.
///
/// # Errors
/// - `InvalidConfig` if any vector has the wrong dimensionality.
/// - `Qdrant` on transport/server errors.
pub async fn upsert_batch(
    client: &Qdrant,
    cfg: &NoteStoreConfig,
    batch: Vec<(String, Vec<f32>, ChunkPayload)>,
) -> Result<usize, NoteStoreError> {
    if batch.is_empty() {
        return Ok(0);
    }

    let dim = cfg.embedding_dim;
    let mut points: Vec<PointStruct> = Vec::with_capacity(batch.len());

    for (id, vector, payload) in batch {
        if vector.len() != dim {
            return Err(NoteStoreError::InvalidConfig(format!(
                "vector length {} != EMBEDDING_DIM {} for id {}",
                vector.len(),
                dim,
                id
            )));
        }

        let q_payload = payload_to_qdrant(&payload)?;
        points.push(PointStruct::new(id, vector, q_payload));
    }

    let point_len = points.len();

    client
        .upsert_points(qdrant_client::qdrant::UpsertPointsBuilder::new(
            &cfg.qdrant.collection,
            points,
        ))
        .await
        .map_err(|e| NoteStoreError::Qdrant(format!("upsert_points: {e}")))?;

    Ok(point_len)
}

/// Run k-NN search for a **query vector** and return text-bearing hits.
///
/// Requests payload back and fills [`ChunkHit`] fields from it. Missing or
/// mistyped payload fields fall back to empty strings / zero.
///
/// # Errors
/// - `InvalidConfig` if the query vector length mismatches `EMBEDDING_DIM`.
/// - `Qdrant` on transport/server errors.
pub async fn search_top_k(
    client: &Qdrant,
    cfg: &NoteStoreConfig,
    query_vec: Vec<f32>,
    k: usize,
) -> Result<Vec<ChunkHit>, NoteStoreError> {
    if query_vec.len() != cfg.embedding_dim {
        return Err(NoteStoreError::InvalidConfig(format!(
            "query vector length {} != EMBEDDING_DIM {}",
            query_vec.len(),
            cfg.embedding_dim
        )));
    }

    let builder = SearchPointsBuilder::new(&cfg.qdrant.collection, query_vec, k as u64)
        .with_payload(true);

    let resp = client
        .search_points(builder)
        .await
        .map_err(|e| NoteStoreError::Qdrant(format!("search_points: {e}")))?;

    let hits = resp
        .result
        .into_iter()
        .map(|sp| {
            let id = point_id_string(sp.id);
            let (text, source, page) = payload_fields(&sp.payload);
            ChunkHit {
                score: sp.score,
                id,
                text,
                source,
                page,
            }
        })
        .collect::<Vec<_>>();

    Ok(hits)
}

/// Scroll the whole collection, page by page, collecting up to `cap` chunk
/// payloads. Insertion order is not guaranteed by Qdrant; callers must not
/// rely on it.
///
/// # Errors
/// Returns `NoteStoreError::Qdrant` on transport/server errors.
pub async fn scroll_all(
    client: &Qdrant,
    cfg: &NoteStoreConfig,
    cap: usize,
) -> Result<Vec<ChunkHit>, NoteStoreError> {
    const SCROLL_PAGE: u32 = 256;

    let mut out: Vec<ChunkHit> = Vec::new();
    let mut offset: Option<qdrant_client::qdrant::PointId> = None;

    loop {
        let mut builder = ScrollPointsBuilder::new(&cfg.qdrant.collection)
            .limit(SCROLL_PAGE)
            .with_payload(true);
        if let Some(off) = offset.take() {
            builder = builder.offset(off);
        }

        let resp = client
            .scroll(builder)
            .await
            .map_err(|e| NoteStoreError::Qdrant(format!("scroll: {e}")))?;

        for point in resp.result {
            if out.len() >= cap {
                return Ok(out);
            }
            let id = point_id_string(point.id);
            let (text, source, page) = payload_fields(&point.payload);
            out.push(ChunkHit {
                score: 0.0,
                id,
                text,
                source,
                page,
            });
        }

        match resp.next_page_offset {
            Some(next) if out.len() < cap => offset = Some(next),
            _ => break,
        }
    }

    Ok(out)
}

/// Extract ID in a stable string form.
fn point_id_string(pid: Option<qdrant_client::qdrant::PointId>) -> String {
    match pid.and_then(|p| p.point_id_options) {
        Some(qdrant_client::qdrant::point_id::PointIdOptions::Uuid(s)) => s,
        Some(qdrant_client::qdrant::point_id::PointIdOptions::Num(n)) => n.to_string(),
        None => String::new(),
    }
}

/// Best-effort extraction of `(text, source, page)` from a point payload.
fn payload_fields(
    payload: &std::collections::HashMap<String, qdrant_client::qdrant::Value>,
) -> (String, String, usize) {
    let mut text = String::new();
    let mut source = String::new();
    let mut page = 0usize;

    if let Some(v) = payload.get("text") {
        if let Some(s) = v.clone().into_json().as_str() {
            text = s.to_owned();
        }
    }
    if let Some(v) = payload.get("source") {
        if let Some(s) = v.clone().into_json().as_str() {
            source = s.to_owned();
        }
    }
    if let Some(v) = payload.get("page") {
        if let Some(n) = v.clone().into_json().as_u64() {
            page = n as usize;
        }
    }

    (text, source, page)
}
