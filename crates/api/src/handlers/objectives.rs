//! Handlers for the `/objectives` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use okr_core::error::CoreError;
use okr_core::okr::normalize_optional_text;
use okr_core::types::DbId;
use okr_db::models::key_result::{CreateKeyResult, KeyResultWithTasks};
use okr_db::models::objective::{
    CreateObjective, Objective, ObjectiveTree, ObjectiveWithKeyResults, UpdateObjective,
};
use okr_db::repositories::{KeyResultRepo, ObjectiveRepo};

use super::{
    ensure_objective_owned, normalize_create_key_result, normalize_create_objective,
    normalize_patch_text,
};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/objectives
///
/// Creates the objective, its key results and their tasks atomically.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateObjective>,
) -> AppResult<(StatusCode, Json<Objective>)> {
    let input = normalize_create_objective(input)?;
    let (key_results, tasks) = input.child_counts();

    let objective = ObjectiveRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(
        user_id = auth.user_id,
        objective_id = objective.id,
        key_results,
        tasks,
        "Objective created"
    );
    Ok((StatusCode::CREATED, Json(objective)))
}

/// GET /api/objectives
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<ObjectiveWithKeyResults>>> {
    let objectives = ObjectiveRepo::list_by_user(&state.pool, auth.user_id).await?;
    Ok(Json(objectives))
}

/// GET /api/objectives/{id}
///
/// Returns the full subtree: key results with their tasks.
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ObjectiveTree>> {
    ensure_objective_owned(&state.pool, id, auth.user_id).await?;
    let tree = ObjectiveRepo::find_tree(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Objective",
            id,
        }))?;
    Ok(Json(tree))
}

/// PUT /api/objectives/{id}
///
/// Absent fields are kept; `description` and `dueDate` are cleared by an
/// explicit `null` (or a blank string).
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateObjective>,
) -> AppResult<Json<Objective>> {
    ensure_objective_owned(&state.pool, id, auth.user_id).await?;

    let input = UpdateObjective {
        name: normalize_patch_text("name", input.name)?,
        description: input
            .description
            .map(|d| normalize_optional_text("description", d.as_deref()))
            .transpose()?,
        due_date: input.due_date,
    };
    let objective = ObjectiveRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Objective",
            id,
        }))?;
    Ok(Json(objective))
}

/// DELETE /api/objectives/{id}
///
/// Key results and tasks are removed by cascade.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_objective_owned(&state.pool, id, auth.user_id).await?;

    if ObjectiveRepo::delete(&state.pool, id).await? {
        tracing::info!(user_id = auth.user_id, objective_id = id, "Objective deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Objective",
            id,
        }))
    }
}

/// POST /api/objectives/{id}/keyresults
///
/// Adds one key result (and its tasks) to an existing objective.
pub async fn create_key_result(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<CreateKeyResult>,
) -> AppResult<(StatusCode, Json<KeyResultWithTasks>)> {
    ensure_objective_owned(&state.pool, id, auth.user_id).await?;
    let input = normalize_create_key_result(input)?;

    let created = KeyResultRepo::create(&state.pool, id, &input).await?;
    tracing::info!(
        user_id = auth.user_id,
        objective_id = id,
        key_result_id = created.key_result.id,
        "Key result created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}
