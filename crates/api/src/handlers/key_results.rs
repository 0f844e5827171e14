//! Handlers for the `/keyresults` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use okr_core::error::CoreError;
use okr_core::types::DbId;
use okr_db::models::key_result::{KeyResult, UpdateKeyResult};
use okr_db::models::task::{CreateTask, Task};
use okr_db::repositories::{KeyResultRepo, TaskRepo};
use serde::Deserialize;

use super::{ensure_key_result_owned, key_result_change, normalize_create_task, normalize_patch_text};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `PUT /keyresults/{id}/progress`.
#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub progress: i64,
}

/// PUT /api/keyresults/{id}/progress
///
/// Only the owner may update; the value must lie within `0..=target`.
pub async fn update_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<ProgressRequest>,
) -> AppResult<Json<KeyResult>> {
    let change = KeyResultRepo::update_progress(&state.pool, id, auth.user_id, input.progress).await?;
    let key_result = key_result_change(id, auth.user_id, change)?;
    tracing::info!(
        user_id = auth.user_id,
        key_result_id = id,
        progress = key_result.progress,
        target = key_result.target,
        "Key result progress updated"
    );
    Ok(Json(key_result))
}

/// PUT /api/keyresults/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateKeyResult>,
) -> AppResult<Json<KeyResult>> {
    if let Some(target) = input.target {
        okr_core::okr::validate_target(target)?;
    }
    let input = UpdateKeyResult {
        description: normalize_patch_text("description", input.description)?,
        target: input.target,
    };

    let change = KeyResultRepo::update(&state.pool, id, auth.user_id, &input).await?;
    Ok(Json(key_result_change(id, auth.user_id, change)?))
}

/// DELETE /api/keyresults/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_key_result_owned(&state.pool, id, auth.user_id).await?;

    if KeyResultRepo::delete(&state.pool, id).await? {
        tracing::info!(user_id = auth.user_id, key_result_id = id, "Key result deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "KeyResult",
            id,
        }))
    }
}

/// GET /api/keyresults/{id}/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Task>>> {
    ensure_key_result_owned(&state.pool, id, auth.user_id).await?;
    let tasks = TaskRepo::list_by_key_result(&state.pool, id).await?;
    Ok(Json(tasks))
}

/// POST /api/keyresults/{id}/tasks
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    ensure_key_result_owned(&state.pool, id, auth.user_id).await?;
    let input = normalize_create_task(input)?;

    let task = TaskRepo::create(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}
