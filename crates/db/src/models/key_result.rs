//! Key result entity model and DTOs.

use okr_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::task::{CreateTask, Task};

/// A key result row from the `key_results` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyResult {
    pub id: DbId,
    pub objective_id: DbId,
    pub description: String,
    pub target: i32,
    pub progress: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A key result together with its tasks.
#[derive(Debug, Clone, Serialize)]
pub struct KeyResultWithTasks {
    #[serde(flatten)]
    pub key_result: KeyResult,
    pub tasks: Vec<Task>,
}

/// DTO for creating a key result and, optionally, its tasks.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateKeyResult {
    pub description: String,
    pub target: i32,
    #[serde(default)]
    pub tasks: Vec<CreateTask>,
}

/// DTO for updating a key result. All fields are optional.
///
/// Progress has its own endpoint and is not patchable here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateKeyResult {
    pub description: Option<String>,
    pub target: Option<i32>,
}

/// Outcome of an ownership-checked key result mutation.
///
/// The ownership lookup, range check and write all happen inside one
/// transaction, so the caller only maps the outcome to a response.
#[derive(Debug)]
pub enum KeyResultChange {
    Updated(KeyResult),
    NotFound,
    /// The key result belongs to another user's objective.
    NotOwner,
    /// The write would break `0 <= progress <= target`.
    OutOfRange { progress: i64, target: i32 },
}
