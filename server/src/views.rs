//! Page templates. Every page carries the pending flash and whether the visitor is an admin,
//! which the shared layout uses for the banner and navigation.

use askama::Template;
use axum::response::Html;

use crate::models::{
    ActivityLog, Event, EventRegistration, Feedback, GalleryPhoto, Material, RegistrationForm,
};
use crate::session::Flash;
use crate::utils::error::AppError;

pub fn render<T: Template>(page: &T) -> Result<Html<String>, AppError> {
    Ok(Html(page.render()?))
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub flash: Option<Flash>,
    pub is_admin: bool,
    pub events: Vec<Event>,
    pub photos: Vec<GalleryPhoto>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub flash: Option<Flash>,
    pub is_admin: bool,
    pub invalid: bool,
    pub username: String,
}

/// An event with its registration count, as listed on the dashboard.
pub struct EventRow {
    pub event: Event,
    pub registrations: i64,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub flash: Option<Flash>,
    pub is_admin: bool,
    pub events: Vec<EventRow>,
    pub photos: Vec<GalleryPhoto>,
    pub materials: Vec<Material>,
    pub feedback: Vec<Feedback>,
}

#[derive(Template)]
#[template(path = "events.html")]
pub struct EventsPage {
    pub flash: Option<Flash>,
    pub is_admin: bool,
    pub events: Vec<Event>,
}

#[derive(Template)]
#[template(path = "event_registration.html")]
pub struct RegistrationPage {
    pub flash: Option<Flash>,
    pub is_admin: bool,
    pub event: Event,
    pub form: RegistrationForm,
    pub already_registered: bool,
}

#[derive(Template)]
#[template(path = "registration_success.html")]
pub struct RegistrationSuccessPage {
    pub flash: Option<Flash>,
    pub is_admin: bool,
    pub event: Event,
}

#[derive(Template)]
#[template(path = "event_registrations.html")]
pub struct EventRegistrationsPage {
    pub flash: Option<Flash>,
    pub is_admin: bool,
    pub event: Event,
    pub registrations: Vec<EventRegistration>,
}

#[derive(Template)]
#[template(path = "edit_event.html")]
pub struct EditEventPage {
    pub flash: Option<Flash>,
    pub is_admin: bool,
    pub event: Event,
}

#[derive(Template)]
#[template(path = "gallery.html")]
pub struct GalleryPage {
    pub flash: Option<Flash>,
    pub is_admin: bool,
    pub photos: Vec<GalleryPhoto>,
}

#[derive(Template)]
#[template(path = "edit_photo.html")]
pub struct EditPhotoPage {
    pub flash: Option<Flash>,
    pub is_admin: bool,
    pub photo: GalleryPhoto,
}

#[derive(Template)]
#[template(path = "materials.html")]
pub struct MaterialsPage {
    pub flash: Option<Flash>,
    pub is_admin: bool,
    pub materials: Vec<Material>,
}

#[derive(Template)]
#[template(path = "edit_material.html")]
pub struct EditMaterialPage {
    pub flash: Option<Flash>,
    pub is_admin: bool,
    pub material: Material,
}

#[derive(Template)]
#[template(path = "logs.html")]
pub struct LogsPage {
    pub flash: Option<Flash>,
    pub is_admin: bool,
    pub logs: Vec<ActivityLog>,
}
