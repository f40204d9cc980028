use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Material {
    pub id: i64,
    pub title: String,
    pub subject: String,
    pub target_year: String,
    pub semester: i64,
    /// External link (drive, LMS...) to the actual document.
    pub file_link: String,
    pub upload_date: NaiveDateTime,
}

/// Raw add/edit material form. `semester` stays a string until validated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaterialForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub target_year: String,
    #[serde(default)]
    pub semester: String,
    #[serde(default)]
    pub file_link: String,
}
