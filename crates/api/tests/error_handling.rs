//! Tests for `AppError` -> HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server or
//! database is needed.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use okr_api::error::AppError;
use okr_core::conversation::ConversationError;
use okr_core::error::CoreError;

/// Convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Domain errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "KeyResult",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "KeyResult with id 42 not found");
}

#[tokio::test]
async fn duplicate_email_returns_400() {
    let (status, json) =
        error_to_response(CoreError::DuplicateEmail("a@x.com".into()).into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "DUPLICATE_EMAIL");
    assert_eq!(json["error"], "User already exists");
}

#[tokio::test]
async fn credential_errors_are_indistinguishable() {
    let unknown = error_to_response(CoreError::UnknownEmail("ghost@x.com".into()).into()).await;
    let wrong = error_to_response(CoreError::BadCredential.into()).await;

    assert_eq!(unknown, wrong);
    assert_eq!(unknown.0, StatusCode::BAD_REQUEST);
    assert_eq!(unknown.1["code"], "BAD_CREDENTIAL");
    assert!(!unknown.1["error"].as_str().unwrap().contains("ghost"));
}

#[tokio::test]
async fn token_errors_return_401() {
    let (status, json) = error_to_response(CoreError::MissingToken.into()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "MISSING_TOKEN");

    let (status, json) =
        error_to_response(CoreError::InvalidToken("ExpiredSignature".into()).into()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "INVALID_TOKEN");
    assert_eq!(json["error"], "Token is not valid");
}

#[tokio::test]
async fn forbidden_returns_403() {
    let (status, json) =
        error_to_response(CoreError::Forbidden("Objective 1 belongs to another user".into()).into())
            .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn invalid_progress_names_the_range() {
    let err = CoreError::InvalidProgress {
        progress: 11,
        target: 10,
    };

    let (status, json) = error_to_response(err.into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_PROGRESS");
    assert_eq!(json["error"], "Progress 11 is outside the range 0..=10");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let (status, json) =
        error_to_response(CoreError::Validation("name must not be empty".into()).into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "name must not be empty");
}

// ---------------------------------------------------------------------------
// Infrastructure errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn conversation_failure_returns_502_without_stderr() {
    let err = AppError::Conversation(ConversationError::ExecutionFailed {
        exit_code: 1,
        stderr: "Traceback: secret path /opt/model".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "CONVERSATION_ERROR");
    assert_eq!(json["error"], "Error during conversation");
}

#[tokio::test]
async fn database_error_is_sanitized() {
    let err = AppError::Database(sqlx::Error::PoolTimedOut);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn internal_error_hides_details() {
    let err = AppError::InternalError("Password hashing error: out of memory".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");
}
