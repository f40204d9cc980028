use sqlx::SqlitePool;

use crate::models::{Material, MaterialForm};
use crate::utils::error::AppError;

const MATERIAL_COLUMNS: &str = "id, title, subject, target_year, semester, file_link, upload_date";

/// A material form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMaterial {
    pub title: String,
    pub subject: String,
    pub target_year: String,
    pub semester: i64,
    pub file_link: String,
}

impl TryFrom<&MaterialForm> for NewMaterial {
    type Error = AppError;

    fn try_from(form: &MaterialForm) -> Result<Self, Self::Error> {
        let title = form.title.trim();
        let subject = form.subject.trim();
        let target_year = form.target_year.trim();
        let file_link = form.file_link.trim();

        if [title, subject, target_year, file_link]
            .iter()
            .any(|field| field.is_empty())
        {
            return Err(AppError::Validation(
                "Title, subject, year, semester and link are all required".into(),
            ));
        }

        let semester = form
            .semester
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|s| *s > 0)
            .ok_or_else(|| AppError::Validation("Semester must be a positive number".into()))?;

        Ok(Self {
            title: title.to_string(),
            subject: subject.to_string(),
            target_year: target_year.to_string(),
            semester,
            file_link: file_link.to_string(),
        })
    }
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<Material>, AppError> {
    let sql = format!("SELECT {MATERIAL_COLUMNS} FROM materials ORDER BY upload_date DESC, id DESC");
    Ok(sqlx::query_as::<_, Material>(&sql).fetch_all(pool).await?)
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Material, AppError> {
    let sql = format!("SELECT {MATERIAL_COLUMNS} FROM materials WHERE id = ?");
    sqlx::query_as::<_, Material>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Material not found".into()))
}

pub async fn create(pool: &SqlitePool, material: &NewMaterial) -> Result<i64, AppError> {
    let id = sqlx::query(
        "INSERT INTO materials (title, subject, target_year, semester, file_link) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&material.title)
    .bind(&material.subject)
    .bind(&material.target_year)
    .bind(material.semester)
    .bind(&material.file_link)
    .execute(pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}

pub async fn update(pool: &SqlitePool, id: i64, material: &NewMaterial) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE materials SET title = ?, subject = ?, target_year = ?, semester = ?, file_link = ? \
         WHERE id = ?",
    )
    .bind(&material.title)
    .bind(&material.subject)
    .bind(&material.target_year)
    .bind(material.semester)
    .bind(&material.file_link)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Material not found".into()));
    }
    Ok(())
}

/// Returns whether a row was removed.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM materials WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
