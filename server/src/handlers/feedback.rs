use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum_extra::extract::cookie::SignedCookieJar;

use crate::extractors::{AdminSession, FeedbackMessage};
use crate::session::Flash;
use crate::state::AppState;
use crate::store::{activity, feedback};
use crate::utils::error::AppError;
use crate::utils::response::{ack, redirect_with_error, redirect_with_flash, wants_json};

const THANKS_JSON: &str = "Thank you for your feedback!";
const THANKS_PAGE: &str = "Thank you for your feedback! Your voice matters.";
const FAILED: &str = "An error occurred. Please try again.";

/// Anonymous feedback. Answers AJAX callers with JSON and everyone else with a flash + redirect.
pub async fn submit_feedback(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    headers: HeaderMap,
    body: Result<FeedbackMessage, AppError>,
) -> Response {
    let json = wants_json(&headers);

    // An unreadable body counts as an empty message.
    let message = match body {
        Ok(FeedbackMessage(message)) => message,
        Err(e) => {
            tracing::debug!(error = %e, "Unreadable feedback body");
            String::new()
        }
    };

    match feedback::submit(&state.db, &message).await {
        Ok(id) => {
            activity::record(&state.db, "New anonymous feedback submitted").await;
            tracing::info!(feedback_id = id, "Feedback received");

            if json {
                ack(StatusCode::OK, true, THANKS_JSON)
            } else {
                redirect_with_flash(jar, "/", Flash::success(THANKS_PAGE))
            }
        }
        Err(e) => {
            e.log();
            let message = if e.is_client_error() {
                e.public_message()
            } else {
                FAILED.to_string()
            };

            if json {
                ack(e.status_code(), false, message)
            } else {
                redirect_with_flash(jar, "/", Flash::error(message))
            }
        }
    }
}

pub async fn clear_inbox(
    _admin: AdminSession,
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Response {
    match feedback::clear(&state.db).await {
        Ok(count) => {
            activity::record(
                &state.db,
                format!("Cleared {count} feedback message(s) from inbox"),
            )
            .await;
            redirect_with_flash(
                jar,
                "/dashboard",
                Flash::success(format!("Successfully deleted {count} feedback message(s).")),
            )
        }
        Err(e) => redirect_with_error(jar, "/dashboard", e),
    }
}
