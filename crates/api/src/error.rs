use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use okr_core::conversation::ConversationError;
use okr_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses of
/// the form `{"error": <message>, "code": <CODE>}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `okr_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The request body was not valid JSON for the expected shape.
    #[error("Invalid request body: {0}")]
    JsonBody(#[from] JsonRejection),

    /// The conversational reply process failed.
    #[error("Conversation error: {0}")]
    Conversation(#[from] ConversationError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Message shown for both unknown emails and wrong passwords so login
/// responses do not reveal which accounts exist.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => classify_core_error(core),

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Request body ---
            AppError::JsonBody(rejection) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                rejection.body_text(),
            ),

            // --- External conversation service ---
            AppError::Conversation(err) => {
                tracing::error!(error = %err, "Conversation process failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "CONVERSATION_ERROR",
                    "Error during conversation".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(core: &CoreError) -> (StatusCode, &'static str, String) {
    match core {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::DuplicateEmail(_) => (
            StatusCode::BAD_REQUEST,
            "DUPLICATE_EMAIL",
            "User already exists".to_string(),
        ),
        CoreError::InvalidEmail(email) => (
            StatusCode::BAD_REQUEST,
            "INVALID_EMAIL",
            format!("'{email}' is not a valid email address"),
        ),
        CoreError::UnknownEmail(_) | CoreError::BadCredential => (
            StatusCode::BAD_REQUEST,
            "BAD_CREDENTIAL",
            INVALID_CREDENTIALS.to_string(),
        ),
        CoreError::MissingToken => (
            StatusCode::UNAUTHORIZED,
            "MISSING_TOKEN",
            "No token, authorization denied".to_string(),
        ),
        CoreError::InvalidToken(reason) => {
            tracing::debug!(%reason, "Rejected bearer token");
            (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Token is not valid".to_string(),
            )
        }
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::InvalidProgress { .. } => {
            (StatusCode::BAD_REQUEST, "INVALID_PROGRESS", core.to_string())
        }
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message; the full error
///   is logged.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
