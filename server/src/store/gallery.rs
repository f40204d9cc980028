use sqlx::SqlitePool;

use crate::models::GalleryPhoto;
use crate::utils::error::AppError;

const PHOTO_COLUMNS: &str = "id, image_file, caption, upload_date";

pub async fn list(pool: &SqlitePool) -> Result<Vec<GalleryPhoto>, AppError> {
    let sql = format!("SELECT {PHOTO_COLUMNS} FROM gallery ORDER BY upload_date DESC, id DESC");
    Ok(sqlx::query_as::<_, GalleryPhoto>(&sql).fetch_all(pool).await?)
}

pub async fn recent(pool: &SqlitePool, limit: i64) -> Result<Vec<GalleryPhoto>, AppError> {
    let sql = format!(
        "SELECT {PHOTO_COLUMNS} FROM gallery ORDER BY upload_date DESC, id DESC LIMIT ?"
    );
    Ok(sqlx::query_as::<_, GalleryPhoto>(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await?)
}

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<GalleryPhoto>, AppError> {
    let sql = format!("SELECT {PHOTO_COLUMNS} FROM gallery WHERE id = ?");
    Ok(sqlx::query_as::<_, GalleryPhoto>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?)
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<GalleryPhoto, AppError> {
    find(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Photo not found".into()))
}

pub async fn create(pool: &SqlitePool, image_file: &str, caption: &str) -> Result<i64, AppError> {
    let id = sqlx::query("INSERT INTO gallery (image_file, caption) VALUES (?, ?)")
        .bind(image_file)
        .bind(caption.trim())
        .execute(pool)
        .await?
        .last_insert_rowid();
    Ok(id)
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    caption: &str,
    image_file: Option<&str>,
) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE gallery SET caption = ?, image_file = COALESCE(?, image_file) WHERE id = ?",
    )
    .bind(caption.trim())
    .bind(image_file)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Photo not found".into()));
    }
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<Option<GalleryPhoto>, AppError> {
    let Some(photo) = find(pool, id).await? else {
        return Ok(None);
    };
    sqlx::query("DELETE FROM gallery WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(Some(photo))
}
