use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo::User;
use crate::error::AppError;
use crate::tasks::marker;

/// Task record. `username` is a denormalized copy of the owner's display
/// name taken at creation time. `completed` is part of the stored shape but
/// no route toggles it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: OffsetDateTime,
}

/// Every task in the store, newest first, regardless of owner. The list view
/// is global by design; only mutation is owner-scoped.
pub async fn list_all(db: &PgPool) -> Result<Vec<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        r#"
        SELECT id, user_id, username, title, description, completed, created_at
        FROM tasks
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(db)
    .await
}

/// Create a task for `owner`, stamping the description with today's marker.
pub async fn create(
    db: &PgPool,
    owner: &User,
    title: &str,
    description: &str,
) -> Result<Task, sqlx::Error> {
    let description = marker::prefix(description, OffsetDateTime::now_utc().date());
    sqlx::query_as::<_, Task>(
        r#"
        INSERT INTO tasks (user_id, username, title, description, completed)
        VALUES ($1, $2, $3, $4, FALSE)
        RETURNING id, user_id, username, title, description, completed, created_at
        "#,
    )
    .bind(owner.id)
    .bind(&owner.name)
    .bind(title)
    .bind(&description)
    .fetch_one(db)
    .await
}

/// Lookup filtered by id AND owner. A nonexistent id and someone else's task
/// both come back as `None`; callers cannot probe for other users' tasks.
pub async fn find_owned(
    db: &PgPool,
    task_id: Uuid,
    owner_id: Uuid,
) -> Result<Option<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        r#"
        SELECT id, user_id, username, title, description, completed, created_at
        FROM tasks
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(task_id)
    .bind(owner_id)
    .fetch_optional(db)
    .await
}

/// Apply an edit, re-deriving the description marker from the stored text.
pub async fn update_owned(
    db: &PgPool,
    task_id: Uuid,
    owner_id: Uuid,
    new_title: &str,
    new_description: &str,
) -> Result<(), AppError> {
    let current = find_owned(db, task_id, owner_id)
        .await?
        .ok_or(AppError::NotOwnedOrMissing)?;

    let description = marker::splice(&current.description, new_description);

    let result = sqlx::query(
        r#"
        UPDATE tasks
        SET title = $1, description = $2
        WHERE id = $3 AND user_id = $4
        "#,
    )
    .bind(new_title)
    .bind(&description)
    .bind(task_id)
    .bind(owner_id)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotOwnedOrMissing);
    }
    Ok(())
}

/// Delete a task if and only if `owner_id` owns it.
pub async fn delete_owned(db: &PgPool, task_id: Uuid, owner_id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query(
        r#"
        DELETE FROM tasks
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(task_id)
    .bind(owner_id)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotOwnedOrMissing);
    }
    Ok(())
}
