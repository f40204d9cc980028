use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventRegistration {
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    pub dept_no: String,
    pub class_section: String,
    pub phone: String,
    pub registration_date: NaiveDateTime,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dept_no: String,
    #[serde(default)]
    pub class_section: String,
    #[serde(default)]
    pub phone: String,
}

impl RegistrationForm {
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            dept_no: self.dept_no.trim().to_string(),
            class_section: self.class_section.trim().to_string(),
            phone: self.phone.trim().to_string(),
        }
    }
}
