//! Handlers for the `/tasks` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use okr_core::error::CoreError;
use okr_core::types::DbId;
use okr_db::models::task::{Task, UpdateTask};
use okr_db::repositories::TaskRepo;

use super::{ensure_task_owned, normalize_patch_text};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// PUT /api/tasks/{id}
///
/// Edits the description and/or marks the task (in)complete.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateTask>,
) -> AppResult<Json<Task>> {
    ensure_task_owned(&state.pool, id, auth.user_id).await?;

    let input = UpdateTask {
        description: normalize_patch_text("description", input.description)?,
        is_completed: input.is_completed,
    };
    let task = TaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_task_owned(&state.pool, id, auth.user_id).await?;

    if TaskRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Task", id }))
    }
}
