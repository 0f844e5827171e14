//! Request-body extractor that reports failures through [`AppError`].

use axum::extract::FromRequest;

use crate::error::AppError;

/// Drop-in replacement for [`axum::Json`] as a request extractor.
///
/// Malformed JSON, a missing `Content-Type`, or a body that does not match
/// the target type become a 400 `VALIDATION_ERROR` with the usual
/// `{"error", "code"}` body instead of axum's plain-text rejection.
///
/// ```ignore
/// async fn create(AppJson(input): AppJson<CreateTask>) -> AppResult<Json<Task>> { .. }
/// ```
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
