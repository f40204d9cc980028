use sqlx::SqlitePool;
use tracing::instrument;

use crate::models::{EventRegistration, RegistrationForm};
use crate::store::events;
use crate::utils::error::AppError;

pub const MISSING_FIELDS: &str = "Name, Dept No. and Class Section are required";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered(i64),
    AlreadyRegistered,
}

/// Registers an attendee. The same (event, name, dept no.) may only register once; the lookup
/// gives the friendly answer and the unique index settles concurrent submissions.
#[instrument(skip(pool, form), fields(name = %form.name))]
pub async fn register(
    pool: &SqlitePool,
    event_id: i64,
    form: &RegistrationForm,
) -> Result<RegistrationOutcome, AppError> {
    events::get(pool, event_id).await?;

    let form = form.trimmed();
    if form.name.is_empty() || form.dept_no.is_empty() || form.class_section.is_empty() {
        return Err(AppError::Validation(MISSING_FIELDS.into()));
    }

    if is_registered(pool, event_id, &form.name, &form.dept_no).await? {
        return Ok(RegistrationOutcome::AlreadyRegistered);
    }

    let inserted = sqlx::query(
        "INSERT INTO event_registrations (event_id, name, dept_no, class_section, phone) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(event_id)
    .bind(&form.name)
    .bind(&form.dept_no)
    .bind(&form.class_section)
    .bind(&form.phone)
    .execute(pool)
    .await;

    match inserted {
        Ok(result) => Ok(RegistrationOutcome::Registered(result.last_insert_rowid())),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Ok(RegistrationOutcome::AlreadyRegistered)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn is_registered(
    pool: &SqlitePool,
    event_id: i64,
    name: &str,
    dept_no: &str,
) -> Result<bool, AppError> {
    let existing: Option<(i64,)> = sqlx::query_as(
        "SELECT id FROM event_registrations WHERE event_id = ? AND name = ? AND dept_no = ?",
    )
    .bind(event_id)
    .bind(name)
    .bind(dept_no)
    .fetch_optional(pool)
    .await?;
    Ok(existing.is_some())
}

pub async fn list_for_event(
    pool: &SqlitePool,
    event_id: i64,
) -> Result<Vec<EventRegistration>, AppError> {
    let rows = sqlx::query_as::<_, EventRegistration>(
        "SELECT id, event_id, name, dept_no, class_section, phone, registration_date \
         FROM event_registrations WHERE event_id = ? \
         ORDER BY registration_date DESC, id DESC",
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Registration count per event id, for events with at least one registration.
pub async fn counts(pool: &SqlitePool) -> Result<Vec<(i64, i64)>, AppError> {
    let rows = sqlx::query_as::<_, (i64, i64)>(
        "SELECT event_id, COUNT(*) FROM event_registrations GROUP BY event_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
