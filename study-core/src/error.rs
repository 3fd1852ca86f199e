//! Typed error for the study-core crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudyError {
    /// Errors from the LLM gateway.
    #[error("LLM error: {0}")]
    Llm(#[from] llm_gateway::LlmError),

    /// JSON (de)serialization issues (should be rare).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The quiz loop exhausted its attempt budget without accepting a single
    /// question.
    #[error("could not generate questions; try another topic or difficulty")]
    QuizExhausted,
}
