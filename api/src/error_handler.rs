use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use note_store::errors::note_store_error::NoteStoreError;
use serde::Serialize;
use thiserror::Error;

use llm_gateway::LlmError;
use study_core::StudyError;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Rich HTTP error mapped from lower layers with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // 4xx
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,

            // custom mapped
            AppError::Http { status, .. } => *status,

            // 5xx
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Http { code, .. } => code,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Convert common Axum rejections to `AppError`.
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Gateway failures surface as upstream errors; config problems are ours.
impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Config(e) => AppError::Http {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "CONFIG_ERROR",
                message: e.to_string(),
            },
            other => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "UPSTREAM_LLM_ERROR",
                message: other.to_string(),
            },
        }
    }
}

/// Map note-store failures to precise HTTP statuses & codes.
impl From<NoteStoreError> for AppError {
    fn from(err: NoteStoreError) -> Self {
        match err {
            NoteStoreError::FileNotFound(path) => {
                AppError::NotFound(format!("document not found: {}", path.display()))
            }
            NoteStoreError::Embedding(e) => AppError::from(e),
            NoteStoreError::Qdrant(msg) => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "VECTOR_STORE_ERROR",
                message: msg,
            },
            NoteStoreError::EnvParse { .. } | NoteStoreError::InvalidConfig(_) => AppError::Http {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "CONFIG_ERROR",
                message: err.to_string(),
            },
            NoteStoreError::Io(e) => AppError::Http {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "IO_ERROR",
                message: e.to_string(),
            },
            NoteStoreError::Json(e) => AppError::Http {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "JSON_ERROR",
                message: e.to_string(),
            },
        }
    }
}

impl From<StudyError> for AppError {
    fn from(err: StudyError) -> Self {
        match err {
            StudyError::Llm(e) => AppError::from(e),
            StudyError::Json(e) => AppError::Http {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "JSON_ERROR",
                message: e.to_string(),
            },
            StudyError::QuizExhausted => AppError::Http {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                code: "QUIZ_EXHAUSTED",
                message: err.to_string(),
            },
        }
    }
}
