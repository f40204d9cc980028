use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::create_security_headers_layer;
use crate::handlers::{
    auth, dashboard, events, feedback, gallery, health_check, materials, public, registration,
};
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    let uploads = ServeDir::new(&state.config.upload_dir);
    let body_limit = state.config.max_upload_bytes;
    let production = state.config.production;

    Router::new()
        .route("/", get(public::home))
        .route("/health", get(health_check))
        // Session
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/logs", get(dashboard::logs))
        // Events and registration
        .route("/events", get(public::events_page))
        .route(
            "/register/:event_id",
            get(registration::register_page).post(registration::register),
        )
        .route(
            "/registration-success/:event_id",
            get(registration::registration_success),
        )
        .route(
            "/event-registrations/:event_id",
            get(events::event_registrations),
        )
        .route("/add_event", post(events::add_event))
        .route(
            "/edit_event/:id",
            get(events::edit_event_page).post(events::edit_event),
        )
        .route("/delete_event/:id", post(events::delete_event))
        // Gallery
        .route("/gallery", get(public::gallery_page))
        .route("/upload_photo", post(gallery::upload_photo))
        .route(
            "/edit_photo/:id",
            get(gallery::edit_photo_page).post(gallery::edit_photo),
        )
        .route("/delete_photo/:id", post(gallery::delete_photo))
        // Materials
        .route("/materials", get(public::materials_page))
        .route("/add_material", post(materials::add_material))
        .route(
            "/edit_material/:id",
            get(materials::edit_material_page).post(materials::edit_material),
        )
        .route("/delete_material/:id", post(materials::delete_material))
        // Feedback
        .route("/submit_feedback", post(feedback::submit_feedback))
        .route("/clear_inbox", post(feedback::clear_inbox))
        .nest_service("/static/uploads", uploads)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer(production))
        .with_state(state)
}
