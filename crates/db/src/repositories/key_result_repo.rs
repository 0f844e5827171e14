//! Repository for the `key_results` table.

use okr_core::okr::validate_progress;
use okr_core::types::DbId;
use sqlx::PgPool;

use crate::models::key_result::{
    CreateKeyResult, KeyResult, KeyResultChange, KeyResultWithTasks, UpdateKeyResult,
};
use crate::repositories::TaskRepo;

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str =
    "id, objective_id, description, target, progress, created_at, updated_at";

/// Row locked by [`KeyResultRepo::lock_for_owner`].
#[derive(sqlx::FromRow)]
struct LockedKeyResult {
    owner_id: DbId,
    target: i32,
    progress: i32,
}

/// Provides CRUD operations for key results.
pub struct KeyResultRepo;

impl KeyResultRepo {
    /// Insert a key result and its tasks under an objective in one transaction.
    pub async fn create(
        pool: &PgPool,
        objective_id: DbId,
        input: &CreateKeyResult,
    ) -> Result<KeyResultWithTasks, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let created = Self::create_inner(&mut tx, objective_id, input).await?;
        tx.commit().await?;
        Ok(created)
    }

    /// Insert a key result and its tasks inside the caller's transaction.
    ///
    /// Every insert is awaited in order; the first failure aborts and the
    /// caller's transaction rolls back on drop.
    pub(crate) async fn create_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        objective_id: DbId,
        input: &CreateKeyResult,
    ) -> Result<KeyResultWithTasks, sqlx::Error> {
        let query = format!(
            "INSERT INTO key_results (objective_id, description, target)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let key_result = sqlx::query_as::<_, KeyResult>(&query)
            .bind(objective_id)
            .bind(&input.description)
            .bind(input.target)
            .fetch_one(&mut **tx)
            .await?;

        let mut tasks = Vec::with_capacity(input.tasks.len());
        for task in &input.tasks {
            tasks.push(TaskRepo::create_inner(&mut **tx, key_result.id, task).await?);
        }

        Ok(KeyResultWithTasks { key_result, tasks })
    }

    /// Find a key result by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<KeyResult>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM key_results WHERE id = $1");
        sqlx::query_as::<_, KeyResult>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the key results of several objectives in insertion order.
    pub(crate) async fn list_by_objectives(
        conn: &mut sqlx::PgConnection,
        objective_ids: &[DbId],
    ) -> Result<Vec<KeyResult>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM key_results WHERE objective_id = ANY($1) ORDER BY id"
        );
        sqlx::query_as::<_, KeyResult>(&query)
            .bind(objective_ids)
            .fetch_all(conn)
            .await
    }

    /// Resolve the user who owns a key result through its objective.
    pub async fn find_owner(pool: &PgPool, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT o.user_id
             FROM key_results k
             JOIN objectives o ON o.id = k.objective_id
             WHERE k.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Overwrite the progress of a key result owned by `user_id`.
    ///
    /// The owner lookup, the `0..=target` check and the write run in one
    /// transaction holding a row lock, so concurrent writers serialize and
    /// the last one wins. `progress` is taken as `i64` so oversized request
    /// values surface as [`KeyResultChange::OutOfRange`].
    pub async fn update_progress(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        progress: i64,
    ) -> Result<KeyResultChange, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(locked) = Self::lock_for_owner(&mut tx, id).await? else {
            return Ok(KeyResultChange::NotFound);
        };
        if locked.owner_id != user_id {
            return Ok(KeyResultChange::NotOwner);
        }
        let Ok(progress_value) = validate_progress(progress, locked.target) else {
            return Ok(KeyResultChange::OutOfRange {
                progress,
                target: locked.target,
            });
        };

        let query = format!(
            "UPDATE key_results SET progress = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let key_result = sqlx::query_as::<_, KeyResult>(&query)
            .bind(id)
            .bind(progress_value)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(KeyResultChange::Updated(key_result))
    }

    /// Update description and/or target of a key result owned by `user_id`.
    ///
    /// A new target below the current progress is rejected as
    /// [`KeyResultChange::OutOfRange`].
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateKeyResult,
    ) -> Result<KeyResultChange, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(locked) = Self::lock_for_owner(&mut tx, id).await? else {
            return Ok(KeyResultChange::NotFound);
        };
        if locked.owner_id != user_id {
            return Ok(KeyResultChange::NotOwner);
        }
        let target = input.target.unwrap_or(locked.target);
        if validate_progress(i64::from(locked.progress), target).is_err() {
            return Ok(KeyResultChange::OutOfRange {
                progress: i64::from(locked.progress),
                target,
            });
        }

        let query = format!(
            "UPDATE key_results SET
                description = COALESCE($2, description),
                target = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let key_result = sqlx::query_as::<_, KeyResult>(&query)
            .bind(id)
            .bind(&input.description)
            .bind(target)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(KeyResultChange::Updated(key_result))
    }

    /// Delete a key result (and, by cascade, its tasks). Returns `true` if a
    /// row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM key_results WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Lock a key result row and return its owner, target and progress.
    async fn lock_for_owner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<Option<LockedKeyResult>, sqlx::Error> {
        sqlx::query_as::<_, LockedKeyResult>(
            "SELECT o.user_id AS owner_id, k.target, k.progress
             FROM key_results k
             JOIN objectives o ON o.id = k.objective_id
             WHERE k.id = $1
             FOR UPDATE OF k",
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
    }
}
