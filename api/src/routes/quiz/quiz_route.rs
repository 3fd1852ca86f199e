//! POST /quiz — assembles a session of unique multiple-choice questions.

use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::info;

use study_core::{StudyError, assemble_quiz};

use crate::core::app_state::AppState;
use crate::error_handler::{AppError, AppResult};
use crate::routes::quiz::quiz_request::{QuizRequest, QuizResponse};

/// Handler: POST /quiz
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/quiz \
///   -H 'content-type: application/json' \
///   -d '{"topic":"thermodynamics","difficulty":"Medium","num_questions":5}'
/// ```
pub async fn quiz(
    State(state): State<Arc<AppState>>,
    Json(body): Json<QuizRequest>,
) -> AppResult<Json<QuizResponse>> {
    let topic = body.topic.trim();
    if topic.is_empty() {
        return Err(AppError::BadRequest("topic must not be empty".into()));
    }

    match assemble_quiz(
        state.svc.as_ref(),
        state.notes.as_ref(),
        topic,
        body.difficulty,
        body.num_questions,
    )
    .await
    {
        Ok(questions) => {
            info!(
                topic,
                difficulty = ?body.difficulty,
                questions = questions.len(),
                "quiz assembled"
            );
            Ok(Json(QuizResponse {
                ok: true,
                topic: Some(topic.to_string()),
                questions,
                error: None,
            }))
        }
        // A fully exhausted session is a user-visible outcome, not a 5xx.
        Err(StudyError::QuizExhausted) => Ok(Json(QuizResponse {
            ok: false,
            topic: None,
            questions: Vec::new(),
            error: Some("Could not generate questions. Try another topic or difficulty.".into()),
        })),
        Err(e) => Err(e.into()),
    }
}
