use sqlx::SqlitePool;
use tracing::warn;

use crate::models::ActivityLog;
use crate::utils::error::AppError;

/// Appends an entry to the activity log. Never fails the caller: errors are only logged.
pub async fn record(pool: &SqlitePool, action: impl AsRef<str>) {
    let action = action.as_ref();
    if let Err(e) = sqlx::query("INSERT INTO activity_logs (action) VALUES (?)")
        .bind(action)
        .execute(pool)
        .await
    {
        warn!(error = %e, action, "Failed to record activity");
    }
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<ActivityLog>, AppError> {
    let logs = sqlx::query_as::<_, ActivityLog>(
        "SELECT id, action, timestamp FROM activity_logs ORDER BY timestamp DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(logs)
}
