use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GalleryPhoto {
    pub id: i64,
    pub image_file: String,
    pub caption: String,
    pub upload_date: NaiveDateTime,
}
