//! SQLite persistence. One submodule per table; each function is a short run of statements
//! against the shared pool.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::AdminCredentials;
use crate::utils::error::AppError;

pub mod activity;
pub mod events;
pub mod feedback;
pub mod gallery;
pub mod materials;
pub mod registrations;
pub mod users;

const MAX_CONNECTIONS: u32 = 5;

pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await?;

    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!().run(pool).await?;
    Ok(())
}

/// Connects, migrates and applies the optional admin credential override.
pub async fn init(
    database_url: &str,
    admin: Option<&AdminCredentials>,
) -> Result<SqlitePool, AppError> {
    let pool = connect(database_url).await?;
    migrate(&pool).await?;

    if let Some(admin) = admin {
        users::upsert(&pool, &admin.username, &admin.password).await?;
        tracing::info!(username = %admin.username, "Admin credentials set from environment");
    }

    Ok(pool)
}

/// True while any event or gallery row still points at `file_name`.
pub async fn image_in_use(pool: &SqlitePool, file_name: &str) -> Result<bool, AppError> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT (SELECT COUNT(*) FROM events WHERE image_file = ?1) \
              + (SELECT COUNT(*) FROM gallery WHERE image_file = ?1)",
    )
    .bind(file_name)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}
