use serde::{Deserialize, Serialize};

/// Request payload for /doubt.
#[derive(Debug, Deserialize)]
pub struct DoubtRequest {
    /// Natural language question, or a refinement of the previous answer.
    pub question: String,
    /// Previous assistant answer; enables follow-up classification.
    #[serde(default)]
    pub last_answer: Option<String>,
}

/// Response payload for /doubt.
#[derive(Debug, Serialize)]
pub struct DoubtResponse {
    pub ok: bool,
    pub answer: String,
}
