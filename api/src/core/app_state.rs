use std::sync::Arc;

use llm_gateway::LlmServiceProfiles;
use note_store::{NoteStore, config::NoteStoreConfig};

use crate::core::jobs::JobStore;
use crate::error_handler::AppError;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Chat + embedding profiles over the hosted completion service.
    pub svc: Arc<LlmServiceProfiles>,
    /// Persistent similarity-search index of note pages.
    pub notes: Arc<NoteStore>,
    /// Background summary jobs, keyed by generated identifier.
    pub jobs: JobStore,
}

impl AppState {
    /// Load shared state from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        let svc = Arc::new(LlmServiceProfiles::from_env()?);
        let cfg = NoteStoreConfig::from_env()?;
        let notes = Arc::new(NoteStore::new(cfg, svc.clone())?);

        Ok(Self {
            svc,
            notes,
            jobs: JobStore::new(),
        })
    }
}
