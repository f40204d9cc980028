use sqlx::SqlitePool;

use crate::models::Feedback;
use crate::utils::error::AppError;

pub const EMPTY_MESSAGE: &str = "Please enter a message";

/// Stores an anonymous message. Blank input is rejected before reaching the store.
pub async fn submit(pool: &SqlitePool, message: &str) -> Result<i64, AppError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(AppError::Validation(EMPTY_MESSAGE.into()));
    }

    let id = sqlx::query("INSERT INTO feedback (message) VALUES (?)")
        .bind(message)
        .execute(pool)
        .await?
        .last_insert_rowid();
    Ok(id)
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<Feedback>, AppError> {
    let messages = sqlx::query_as::<_, Feedback>(
        "SELECT id, message, timestamp FROM feedback ORDER BY timestamp DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(messages)
}

/// Empties the inbox and returns how many messages it held.
pub async fn clear(pool: &SqlitePool) -> Result<u64, AppError> {
    let deleted = sqlx::query("DELETE FROM feedback")
        .execute(pool)
        .await?
        .rows_affected();
    Ok(deleted)
}
