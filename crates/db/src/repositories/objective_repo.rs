//! Repository for the `objectives` table.

use std::collections::HashMap;

use okr_core::types::DbId;
use sqlx::PgPool;

use crate::models::key_result::{KeyResult, KeyResultWithTasks};
use crate::models::objective::{
    CreateObjective, Objective, ObjectiveTree, ObjectiveWithKeyResults, UpdateObjective,
};
use crate::models::task::Task;
use crate::repositories::{KeyResultRepo, TaskRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, description, due_date, created_at, updated_at";

/// Provides CRUD operations for objectives and reads of their subtrees.
pub struct ObjectiveRepo;

impl ObjectiveRepo {
    /// Insert an objective owned by `user_id` together with every key result
    /// and task in `input`, all in one transaction.
    ///
    /// Either the whole subtree is committed or nothing is.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateObjective,
    ) -> Result<Objective, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO objectives (user_id, name, description, due_date)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let objective = sqlx::query_as::<_, Objective>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.due_date)
            .fetch_one(&mut *tx)
            .await?;

        for key_result in &input.key_results {
            KeyResultRepo::create_inner(&mut tx, objective.id, key_result).await?;
        }

        tx.commit().await?;
        Ok(objective)
    }

    /// Find an objective by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Objective>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM objectives WHERE id = $1");
        sqlx::query_as::<_, Objective>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's objectives in insertion order, each with its key results.
    ///
    /// Both reads share one repeatable-read snapshot so a concurrent delete
    /// cannot tear an objective away from its key results.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ObjectiveWithKeyResults>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM objectives WHERE user_id = $1 ORDER BY id");
        let objectives = sqlx::query_as::<_, Objective>(&query)
            .bind(user_id)
            .fetch_all(&mut *tx)
            .await?;

        let ids: Vec<DbId> = objectives.iter().map(|o| o.id).collect();
        let key_results = KeyResultRepo::list_by_objectives(&mut tx, &ids).await?;
        tx.commit().await?;

        let mut grouped = group_by(key_results, |kr: &KeyResult| kr.objective_id);
        Ok(objectives
            .into_iter()
            .map(|objective| ObjectiveWithKeyResults {
                key_results: grouped.remove(&objective.id).unwrap_or_default(),
                objective,
            })
            .collect())
    }

    /// Load one objective with its key results and their tasks.
    pub async fn find_tree(pool: &PgPool, id: DbId) -> Result<Option<ObjectiveTree>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM objectives WHERE id = $1");
        let Some(objective) = sqlx::query_as::<_, Objective>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let key_results = KeyResultRepo::list_by_objectives(&mut tx, &[objective.id]).await?;
        let kr_ids: Vec<DbId> = key_results.iter().map(|kr| kr.id).collect();
        let tasks = TaskRepo::list_by_key_results(&mut tx, &kr_ids).await?;
        tx.commit().await?;

        let mut tasks_by_kr = group_by(tasks, |t: &Task| t.key_result_id);
        let key_results = key_results
            .into_iter()
            .map(|key_result: KeyResult| KeyResultWithTasks {
                tasks: tasks_by_kr.remove(&key_result.id).unwrap_or_default(),
                key_result,
            })
            .collect();

        Ok(Some(ObjectiveTree {
            objective,
            key_results,
        }))
    }

    /// Update an objective. Only fields present in `input` are applied;
    /// `Some(None)` clears `description` / `due_date`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateObjective,
    ) -> Result<Option<Objective>, sqlx::Error> {
        let query = format!(
            "UPDATE objectives SET
                name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                due_date = CASE WHEN $5 THEN $6 ELSE due_date END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Objective>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|d| d.as_deref()))
            .bind(input.due_date.is_some())
            .bind(input.due_date.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Delete an objective; key results and tasks go with it via
    /// `ON DELETE CASCADE`. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM objectives WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Bucket rows by parent id, preserving their order within each bucket.
fn group_by<T>(rows: Vec<T>, parent_id: impl Fn(&T) -> DbId) -> HashMap<DbId, Vec<T>> {
    let mut map: HashMap<DbId, Vec<T>> = HashMap::new();
    for row in rows {
        map.entry(parent_id(&row)).or_default().push(row);
    }
    map
}
