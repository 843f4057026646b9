use sqlx::PgPool;

use super::{models::UserRow, StoreError, StoreResult};
use crate::game::types::{PlayerId, User};

/// SQLSTATE for unique_violation.
const UNIQUE_VIOLATION: &str = "23505";

pub async fn list_users(db: &PgPool) -> StoreResult<Vec<User>> {
    let rows = sqlx::query_as::<_, UserRow>(
        "SELECT id, name, score, created_at FROM users ORDER BY id",
    )
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(User::from).collect())
}

pub async fn get_user(db: &PgPool, id: PlayerId) -> StoreResult<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, name, score, created_at FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row.map(User::from))
}

/// Inserts a new user with a zero score; returns the new id.
pub async fn add_user(db: &PgPool, name: &str) -> StoreResult<PlayerId> {
    match sqlx::query_scalar::<_, i64>("INSERT INTO users (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(db)
        .await
    {
        Ok(id) => Ok(id),
        Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            Err(StoreError::Duplicate(format!("user `{name}`")))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn update_user_score(db: &PgPool, id: PlayerId, score: i64) -> StoreResult<()> {
    sqlx::query("UPDATE users SET score = $2 WHERE id = $1")
        .bind(id)
        .bind(score)
        .execute(db)
        .await?;
    Ok(())
}
