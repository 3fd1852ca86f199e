use serde::{Deserialize, Serialize};

/// Request payload for /ingest.
#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    /// Filesystem path of the document to load into the note store.
    pub path: String,
}

/// Response payload for /ingest.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub ok: bool,
    /// Number of page-level chunks written.
    pub pages: usize,
    pub path: String,
}
