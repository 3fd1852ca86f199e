use serde::{Deserialize, Serialize};

use study_core::{Difficulty, QuestionRecord};

fn default_num_questions() -> usize {
    5
}

/// Request payload for /quiz.
#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    /// Topic used for context retrieval (e.g. "thermodynamics conduction").
    pub topic: String,
    /// Easy / Medium / Hard; defaults to Medium.
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_num_questions")]
    pub num_questions: usize,
}

/// Response payload for /quiz.
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub questions: Vec<QuestionRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
