use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Free-form `YYYY-MM-DD` as typed by the admin; listings sort on it lexically.
    pub event_date: String,
    pub event_manager: String,
    pub contact_number: String,
    /// Empty when the event has no image.
    pub image_file: String,
    pub created_at: NaiveDateTime,
}

impl Event {
    pub fn has_image(&self) -> bool {
        !self.image_file.is_empty()
    }
}

/// Text fields of the add/edit event form. The image travels separately.
#[derive(Debug, Clone, Default)]
pub struct EventForm {
    pub title: String,
    pub event_date: String,
    pub event_manager: String,
    pub contact_number: String,
    pub description: String,
}
