use std::collections::HashMap;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::extractors::AdminSession;
use crate::session::take_flash;
use crate::state::AppState;
use crate::store::{activity, events, feedback, gallery, materials, registrations};
use crate::utils::error::AppError;
use crate::utils::response::or_empty;
use crate::views::{render, DashboardPage, EventRow, LogsPage};

pub async fn dashboard(
    _admin: AdminSession,
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    let (jar, flash) = take_flash(jar);

    let counts: HashMap<i64, i64> = or_empty(
        registrations::counts(&state.db).await,
        "registration counts",
    )
    .into_iter()
    .collect();

    let events = or_empty(events::list(&state.db).await, "events")
        .into_iter()
        .map(|event| EventRow {
            registrations: counts.get(&event.id).copied().unwrap_or(0),
            event,
        })
        .collect();

    let page = DashboardPage {
        flash,
        is_admin: true,
        events,
        photos: or_empty(gallery::list(&state.db).await, "gallery"),
        materials: or_empty(materials::list(&state.db).await, "materials"),
        feedback: or_empty(feedback::list(&state.db).await, "feedback"),
    };
    Ok((jar, render(&page)?).into_response())
}

pub async fn logs(
    _admin: AdminSession,
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    let (jar, flash) = take_flash(jar);
    let page = LogsPage {
        flash,
        is_admin: true,
        logs: or_empty(activity::list(&state.db).await, "activity log"),
    };
    Ok((jar, render(&page)?).into_response())
}
