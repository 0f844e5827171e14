//! Handler for the conversational reply endpoint.

use axum::extract::State;
use axum::Json;
use okr_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /converse`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConverseRequest {
    pub user_input: String,
}

#[derive(Debug, Serialize)]
pub struct ConverseResponse {
    pub response: String,
}

/// POST /api/converse
pub async fn converse(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<ConverseRequest>,
) -> AppResult<Json<ConverseResponse>> {
    let user_input = input.user_input.trim();
    if user_input.is_empty() {
        return Err(CoreError::Validation("userInput must not be empty".to_string()).into());
    }

    let response = state.conversation.reply(user_input).await?;
    tracing::debug!(user_id = auth.user_id, "Conversation reply sent");
    Ok(Json(ConverseResponse { response }))
}
