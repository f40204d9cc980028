use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::state::AppState;
use crate::{store, upload};

pub mod auth;
pub mod dashboard;
pub mod events;
pub mod feedback;
pub mod gallery;
pub mod materials;
pub mod public;
pub mod registration;

/// Removes an uploaded image unless an event or photo still shows it.
pub(crate) async fn discard_unused_image(state: &AppState, file_name: &str) {
    if file_name.is_empty() {
        return;
    }
    match store::image_in_use(&state.db, file_name).await {
        Ok(false) => upload::remove_image(&state.config.upload_dir, file_name).await,
        Ok(true) => {}
        Err(e) => e.log(),
    }
}

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
    database: &'static str,
}

pub async fn health_check(State(state): State<AppState>) -> Response {
    let database_ok = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            false
        }
    };

    let (status, payload) = if database_ok {
        (
            StatusCode::OK,
            HealthPayload {
                status: "ok",
                service: "portal-server",
                database: "ok",
            },
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            HealthPayload {
                status: "degraded",
                service: "portal-server",
                database: "unavailable",
            },
        )
    };

    (status, Json(payload)).into_response()
}
