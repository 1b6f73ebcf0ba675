use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures reported by the AI completion client. Messages are user-facing;
/// clients surface them verbatim in the suggestion sheet.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API rate limit exceeded. Please try again later.")]
    RateLimitExceeded,

    #[error("Invalid API key. Please check your configuration.")]
    InvalidApiKey,

    #[error("Bad request. Please check your input.")]
    BadRequest,

    #[error("Invalid response from AI service")]
    InvalidResponse,

    #[error("Could not generate suggestion")]
    NoSuggestion,

    #[error("Network connection error. Please check your internet.")]
    Network(#[from] reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Ai(#[from] AiError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::Ai(e) => {
                let status = match e {
                    AiError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
                    AiError::InvalidApiKey => {
                        tracing::error!(error = %e, "AI credentials rejected");
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                    AiError::Network(cause) => {
                        tracing::warn!(error = %cause, "AI request failed in transit");
                        StatusCode::BAD_GATEWAY
                    }
                    AiError::BadRequest | AiError::InvalidResponse | AiError::NoSuggestion => {
                        StatusCode::BAD_GATEWAY
                    }
                };
                (status, e.to_string())
            }
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        };

        let body = json!({
            "error": {
                "message": message,
                "code": status.as_u16(),
            }
        });

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
