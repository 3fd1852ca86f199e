//! Configuration layer: reads runtime settings from environment variables
//! and exposes a strongly typed config for Qdrant and the embedding space.

use serde::{Deserialize, Serialize};

use crate::errors::note_store_error::NoteStoreError;

/// Distance metric supported by Qdrant for the primary vector space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum DistanceMetric {
    Cosine,
    Dot,
    Euclid,
}

impl DistanceMetric {
    /// Parse from env string (case-insensitive). Defaults to Cosine.
    pub fn from_env(s: Option<String>) -> Self {
        match s
            .unwrap_or_else(|| "Cosine".to_string())
            .to_lowercase()
            .as_str()
        {
            "cosine" => DistanceMetric::Cosine,
            "dot" | "dotproduct" => DistanceMetric::Dot,
            "euclid" | "l2" => DistanceMetric::Euclid,
            _ => DistanceMetric::Cosine,
        }
    }
}

/// Qdrant connectivity and collection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QdrantConfig {
    /// gRPC URL for Qdrant (e.g., "http://localhost:6334").
    pub url: String,
    /// Target collection name (e.g., "study_notes").
    pub collection: String,
    /// Vector distance metric (Cosine by default).
    pub distance: DistanceMetric,
    /// Batch size for upserts (vectors + payloads).
    pub batch_size: usize,
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:6334".to_string(),
            collection: "study_notes".to_string(),
            distance: DistanceMetric::Cosine,
            batch_size: 64,
        }
    }
}

/// Top-level runtime configuration for the note store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteStoreConfig {
    /// Qdrant connectivity & collection settings.
    pub qdrant: QdrantConfig,
    /// Embedding vector dimensionality (must match the embedding model).
    pub embedding_dim: usize,
}

impl NoteStoreConfig {
    /// Build configuration from environment variables.
    ///
    /// Environment variables used:
    /// - `QDRANT_URL` (default: "http://localhost:6334")
    /// - `QDRANT_COLLECTION` (default: "study_notes")
    /// - `QDRANT_DISTANCE` (values: "Cosine" | "Dot" | "Euclid"; default: "Cosine")
    /// - `QDRANT_BATCH_SIZE` (default: 64)
    /// - `EMBEDDING_DIM` (default: 768)
    ///
    /// # Errors
    /// Returns [`NoteStoreError::EnvParse`] when a numeric variable is set
    /// but not parseable.
    pub fn from_env() -> Result<Self, NoteStoreError> {
        let defaults = QdrantConfig::default();

        let url = env_or("QDRANT_URL", &defaults.url);
        let collection = env_or("QDRANT_COLLECTION", &defaults.collection);
        let distance = DistanceMetric::from_env(std::env::var("QDRANT_DISTANCE").ok());
        let batch_size = env_parse("QDRANT_BATCH_SIZE", defaults.batch_size)?;
        let embedding_dim = env_parse("EMBEDDING_DIM", 768)?;

        Ok(Self {
            qdrant: QdrantConfig {
                url,
                collection,
                distance,
                batch_size,
            },
            embedding_dim,
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse(name: &str, default: usize) -> Result<usize, NoteStoreError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => {
            v.trim()
                .parse::<usize>()
                .map_err(|_| NoteStoreError::EnvParse {
                    key: name.to_string(),
                    value: v,
                })
        }
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_metric_parses_case_insensitive() {
        assert_eq!(
            DistanceMetric::from_env(Some("dot".into())),
            DistanceMetric::Dot
        );
        assert_eq!(
            DistanceMetric::from_env(Some("L2".into())),
            DistanceMetric::Euclid
        );
        assert_eq!(DistanceMetric::from_env(None), DistanceMetric::Cosine);
        assert_eq!(
            DistanceMetric::from_env(Some("banana".into())),
            DistanceMetric::Cosine
        );
    }
}
