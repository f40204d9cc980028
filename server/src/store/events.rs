use sqlx::SqlitePool;
use tracing::instrument;

use crate::models::{Event, EventForm};
use crate::utils::error::AppError;

const EVENT_COLUMNS: &str = "id, title, description, event_date, event_manager, contact_number, \
                             image_file, created_at";

/// Title and date are required; the other fields may be blank.
pub fn validate(form: &EventForm) -> Result<(), AppError> {
    if form.title.trim().is_empty() || form.event_date.trim().is_empty() {
        return Err(AppError::Validation(
            "Event title and date are required".into(),
        ));
    }
    Ok(())
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<Event>, AppError> {
    let sql = format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY event_date DESC, id DESC");
    Ok(sqlx::query_as::<_, Event>(&sql).fetch_all(pool).await?)
}

pub async fn recent(pool: &SqlitePool, limit: i64) -> Result<Vec<Event>, AppError> {
    let sql = format!(
        "SELECT {EVENT_COLUMNS} FROM events ORDER BY event_date DESC, id DESC LIMIT ?"
    );
    Ok(sqlx::query_as::<_, Event>(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await?)
}

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Event>, AppError> {
    let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?");
    Ok(sqlx::query_as::<_, Event>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?)
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Event, AppError> {
    find(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".into()))
}

#[instrument(skip(pool, form), fields(title = %form.title))]
pub async fn create(pool: &SqlitePool, form: &EventForm, image_file: &str) -> Result<i64, AppError> {
    validate(form)?;

    let id = sqlx::query(
        "INSERT INTO events (title, event_date, event_manager, contact_number, description, image_file) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(form.title.trim())
    .bind(form.event_date.trim())
    .bind(form.event_manager.trim())
    .bind(form.contact_number.trim())
    .bind(form.description.trim())
    .bind(image_file)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Updates the text fields, and the stored image when `image_file` is given.
#[instrument(skip(pool, form))]
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    form: &EventForm,
    image_file: Option<&str>,
) -> Result<(), AppError> {
    validate(form)?;

    let result = sqlx::query(
        "UPDATE events SET title = ?, event_date = ?, event_manager = ?, contact_number = ?, \
         description = ?, image_file = COALESCE(?, image_file) WHERE id = ?",
    )
    .bind(form.title.trim())
    .bind(form.event_date.trim())
    .bind(form.event_manager.trim())
    .bind(form.contact_number.trim())
    .bind(form.description.trim())
    .bind(image_file)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Event not found".into()));
    }
    Ok(())
}

/// Removes the event's registrations, then the event. Returns the deleted row.
#[instrument(skip(pool))]
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<Option<Event>, AppError> {
    let Some(event) = find(pool, id).await? else {
        return Ok(None);
    };

    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM event_registrations WHERE event_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM events WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(Some(event))
}
