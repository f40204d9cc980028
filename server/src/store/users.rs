use sqlx::SqlitePool;

use crate::models::User;
use crate::utils::error::AppError;

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>("SELECT id, username, password FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Looks the user up and compares the password. `None` covers both unknown user and wrong password.
pub async fn authenticate(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    let user = find_by_username(pool, username).await?;
    Ok(user.filter(|u| u.password_matches(password)))
}

pub async fn upsert(pool: &SqlitePool, username: &str, password: &str) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO users (username, password) VALUES (?, ?) \
         ON CONFLICT(username) DO UPDATE SET password = excluded.password",
    )
    .bind(username)
    .bind(password)
    .execute(pool)
    .await?;
    Ok(())
}
