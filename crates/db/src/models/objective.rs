//! Objective entity model and DTOs.

use okr_core::okr::{deserialize_due_date, deserialize_due_date_patch, deserialize_patch};
use okr_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::key_result::{CreateKeyResult, KeyResult, KeyResultWithTasks};

/// An objective row from the `objectives` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub due_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An objective with its key results attached (tasks omitted).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveWithKeyResults {
    #[serde(flatten)]
    pub objective: Objective,
    pub key_results: Vec<KeyResult>,
}

/// An objective with its full subtree: key results and their tasks.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveTree {
    #[serde(flatten)]
    pub objective: Objective,
    pub key_results: Vec<KeyResultWithTasks>,
}

/// DTO for creating an objective together with its whole subtree.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateObjective {
    pub name: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_due_date")]
    pub due_date: Option<Timestamp>,
    #[serde(default)]
    pub key_results: Vec<CreateKeyResult>,
}

/// DTO for updating an objective. All fields are optional.
///
/// `description` and `due_date` are clearable: `Some(None)` (JSON `null`)
/// sets the column to NULL, `None` (field absent) leaves it unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateObjective {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_due_date_patch")]
    pub due_date: Option<Option<Timestamp>>,
}

impl CreateObjective {
    /// Number of key results and tasks this request will insert.
    pub fn child_counts(&self) -> (usize, usize) {
        let tasks = self.key_results.iter().map(|kr| kr.tasks.len()).sum();
        (self.key_results.len(), tasks)
    }
}
