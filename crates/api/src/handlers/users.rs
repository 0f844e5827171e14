//! Handlers for the `/users` resource (register, login).

use axum::extract::State;
use axum::Json;
use okr_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::auth::credentials;
use crate::auth::jwt::issue_token;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

/// Request body for both `POST /users/register` and `POST /users/login`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Successful registration or login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/users/register
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<CredentialsRequest>,
) -> AppResult<Json<TokenResponse>> {
    let user_id = credentials::register(&state.pool, &input.email, &input.password).await?;
    tracing::info!(user_id, "User registered");
    token_response(&state, user_id)
}

/// POST /api/users/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<CredentialsRequest>,
) -> AppResult<Json<TokenResponse>> {
    let user_id = match credentials::verify(&state.pool, &input.email, &input.password).await {
        Ok(id) => id,
        Err(err) => {
            tracing::info!(error = %err, "Login rejected");
            return Err(err);
        }
    };
    tracing::info!(user_id, "User logged in");
    token_response(&state, user_id)
}

fn token_response(state: &AppState, user_id: DbId) -> AppResult<Json<TokenResponse>> {
    let token = issue_token(user_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    Ok(Json(TokenResponse { token }))
}
