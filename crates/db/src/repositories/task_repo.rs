//! Repository for the `tasks` table.

use okr_core::types::DbId;
use sqlx::PgPool;

use crate::models::task::{CreateTask, Task, UpdateTask};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str =
    "id, key_result_id, description, is_completed, created_at, updated_at";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task under a key result, returning the created row.
    pub async fn create(
        pool: &PgPool,
        key_result_id: DbId,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::create_inner(&mut conn, key_result_id, input).await
    }

    /// Insert a task on an existing connection or transaction.
    pub(crate) async fn create_inner(
        conn: &mut sqlx::PgConnection,
        key_result_id: DbId,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (key_result_id, description)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(key_result_id)
            .bind(&input.description)
            .fetch_one(conn)
            .await
    }

    /// List the tasks of one key result in insertion order.
    pub async fn list_by_key_result(
        pool: &PgPool,
        key_result_id: DbId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE key_result_id = $1 ORDER BY id");
        sqlx::query_as::<_, Task>(&query)
            .bind(key_result_id)
            .fetch_all(pool)
            .await
    }

    /// List the tasks of several key results in insertion order.
    pub(crate) async fn list_by_key_results(
        conn: &mut sqlx::PgConnection,
        key_result_ids: &[DbId],
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM tasks WHERE key_result_id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Task>(&query)
            .bind(key_result_ids)
            .fetch_all(conn)
            .await
    }

    /// Resolve the user who owns a task through its key result and objective.
    pub async fn find_owner(pool: &PgPool, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT o.user_id
             FROM tasks t
             JOIN key_results k ON k.id = t.key_result_id
             JOIN objectives o ON o.id = k.objective_id
             WHERE t.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Update a task. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                description = COALESCE($2, description),
                is_completed = COALESCE($3, is_completed)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.description)
            .bind(input.is_completed)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
