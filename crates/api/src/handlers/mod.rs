//! HTTP handlers, one module per resource.
//!
//! Shared helpers here normalize request bodies before they reach the
//! repositories and resolve ownership along the
//! Task -> KeyResult -> Objective -> User chain.

pub mod converse;
pub mod key_results;
pub mod objectives;
pub mod tasks;
pub mod users;

use okr_core::error::CoreError;
use okr_core::okr::{normalize_optional_text, validate_target, validate_text};
use okr_core::types::DbId;
use okr_db::models::key_result::{CreateKeyResult, KeyResult, KeyResultChange};
use okr_db::models::objective::{CreateObjective, Objective};
use okr_db::models::task::CreateTask;
use okr_db::repositories::{KeyResultRepo, ObjectiveRepo, TaskRepo};
use okr_db::DbPool;

use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------------
// Input normalization
// ---------------------------------------------------------------------------

/// Validate and trim an objective-creation body, including its subtree.
pub(crate) fn normalize_create_objective(input: CreateObjective) -> Result<CreateObjective, CoreError> {
    let key_results = input
        .key_results
        .into_iter()
        .map(normalize_create_key_result)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CreateObjective {
        name: validate_text("name", &input.name)?,
        description: normalize_optional_text("description", input.description.as_deref())?,
        due_date: input.due_date,
        key_results,
    })
}

/// Validate and trim a key-result body and its tasks.
pub(crate) fn normalize_create_key_result(
    input: CreateKeyResult,
) -> Result<CreateKeyResult, CoreError> {
    validate_target(input.target)?;
    let tasks = input
        .tasks
        .into_iter()
        .map(normalize_create_task)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CreateKeyResult {
        description: validate_text("key result description", &input.description)?,
        target: input.target,
        tasks,
    })
}

/// Validate and trim a task body.
pub(crate) fn normalize_create_task(input: CreateTask) -> Result<CreateTask, CoreError> {
    Ok(CreateTask {
        description: validate_text("task description", &input.description)?,
    })
}

/// Trim an optional patch field; present-but-blank is a validation error.
pub(crate) fn normalize_patch_text(field: &str, value: Option<String>) -> Result<Option<String>, CoreError> {
    value.map(|v| validate_text(field, &v)).transpose()
}

// ---------------------------------------------------------------------------
// Ownership
// ---------------------------------------------------------------------------

/// Map a resolved owner to `NotFound` / `Forbidden` / success.
fn check_owner(
    entity: &'static str,
    id: DbId,
    owner: Option<DbId>,
    user_id: DbId,
) -> AppResult<()> {
    match owner {
        None => Err(CoreError::NotFound { entity, id }.into()),
        Some(owner) if owner != user_id => Err(forbidden(entity, id, user_id)),
        Some(_) => Ok(()),
    }
}

fn forbidden(entity: &'static str, id: DbId, user_id: DbId) -> AppError {
    tracing::warn!(user_id, entity, id, "Rejected access to another user's record");
    CoreError::Forbidden(format!("{entity} {id} belongs to another user")).into()
}

/// Load an objective and confirm `user_id` owns it.
pub(crate) async fn ensure_objective_owned(
    pool: &DbPool,
    id: DbId,
    user_id: DbId,
) -> AppResult<Objective> {
    let objective = ObjectiveRepo::find_by_id(pool, id).await?;
    check_owner("Objective", id, objective.as_ref().map(|o| o.user_id), user_id)?;
    objective.ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Objective", id }))
}

/// Confirm `user_id` owns the key result's objective.
pub(crate) async fn ensure_key_result_owned(pool: &DbPool, id: DbId, user_id: DbId) -> AppResult<()> {
    let owner = KeyResultRepo::find_owner(pool, id).await?;
    check_owner("KeyResult", id, owner, user_id)
}

/// Confirm `user_id` owns the task's key result's objective.
pub(crate) async fn ensure_task_owned(pool: &DbPool, id: DbId, user_id: DbId) -> AppResult<()> {
    let owner = TaskRepo::find_owner(pool, id).await?;
    check_owner("Task", id, owner, user_id)
}

/// Map a guarded key-result write outcome to the handler result.
pub(crate) fn key_result_change(id: DbId, user_id: DbId, change: KeyResultChange) -> AppResult<KeyResult> {
    match change {
        KeyResultChange::Updated(key_result) => Ok(key_result),
        KeyResultChange::NotFound => Err(CoreError::NotFound {
            entity: "KeyResult",
            id,
        }
        .into()),
        KeyResultChange::NotOwner => Err(forbidden("KeyResult", id, user_id)),
        KeyResultChange::OutOfRange { progress, target } => {
            Err(CoreError::InvalidProgress { progress, target }.into())
        }
    }
}
