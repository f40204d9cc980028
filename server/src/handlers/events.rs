use axum::extract::{Multipart, Path, State};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::extractors::AdminSession;
use crate::handlers::discard_unused_image;
use crate::models::EventForm;
use crate::session::{take_flash, Flash};
use crate::state::AppState;
use crate::store::{activity, events, registrations};
use crate::upload::{self, UploadForm};
use crate::utils::error::AppError;
use crate::utils::response::{or_empty, redirect_with_error, redirect_with_flash};
use crate::views::{render, EditEventPage, EventRegistrationsPage};

const DASHBOARD: &str = "/dashboard";

fn event_form(form: &UploadForm) -> EventForm {
    EventForm {
        title: form.text("title"),
        event_date: form.text("event_date"),
        event_manager: form.text("event_manager"),
        contact_number: form.text("contact_number"),
        description: form.text("description"),
    }
}

/// Validates the text fields before any file is written, so a rejected form leaves no upload behind.
async fn read_event_upload(
    state: &AppState,
    multipart: Multipart,
) -> Result<(EventForm, Option<String>), AppError> {
    let form = UploadForm::from_multipart(multipart).await?;
    let event = event_form(&form);
    events::validate(&event)?;

    let image = match &form.image {
        Some(image) => Some(upload::save_image(&state.config.upload_dir, image).await?),
        None => None,
    };
    Ok((event, image))
}

pub async fn add_event(
    _admin: AdminSession,
    State(state): State<AppState>,
    jar: SignedCookieJar,
    multipart: Multipart,
) -> Response {
    let created = async {
        let (event, image) = read_event_upload(&state, multipart).await?;
        let image = image.unwrap_or_default();
        match events::create(&state.db, &event, &image).await {
            Ok(id) => Ok::<_, AppError>((id, event.title)),
            Err(e) => {
                discard_unused_image(&state, &image).await;
                Err(e)
            }
        }
    }
    .await;

    match created {
        Ok((id, title)) => {
            tracing::info!(event_id = id, "Event added");
            activity::record(&state.db, format!("Added event: {title}")).await;
            redirect_with_flash(jar, DASHBOARD, Flash::success(format!("Event \"{title}\" added.")))
        }
        Err(e) => redirect_with_error(jar, DASHBOARD, e),
    }
}

pub async fn edit_event_page(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    let event = match events::get(&state.db, id).await {
        Ok(event) => event,
        Err(e) => return Ok(redirect_with_error(jar, DASHBOARD, e)),
    };

    let (jar, flash) = take_flash(jar);
    let page = EditEventPage {
        flash,
        is_admin: true,
        event,
    };
    Ok((jar, render(&page)?).into_response())
}

pub async fn edit_event(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: SignedCookieJar,
    multipart: Multipart,
) -> Response {
    let updated = async {
        // Unknown ids are refused before anything is written to disk.
        let previous = events::get(&state.db, id).await?;
        let (event, image) = read_event_upload(&state, multipart).await?;
        let Some(image) = image else {
            events::update(&state.db, id, &event, None).await?;
            return Ok::<_, AppError>(event.title);
        };

        if let Err(e) = events::update(&state.db, id, &event, Some(image.as_str())).await {
            if image != previous.image_file {
                discard_unused_image(&state, &image).await;
            }
            return Err(e);
        }
        if image != previous.image_file {
            discard_unused_image(&state, &previous.image_file).await;
        }
        Ok(event.title)
    }
    .await;

    match updated {
        Ok(title) => {
            activity::record(&state.db, format!("Edited event: {title}")).await;
            redirect_with_flash(jar, DASHBOARD, Flash::success("Event updated."))
        }
        Err(e) => redirect_with_error(jar, DASHBOARD, e),
    }
}

pub async fn delete_event(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: SignedCookieJar,
) -> Response {
    match events::delete(&state.db, id).await {
        Ok(Some(event)) => {
            discard_unused_image(&state, &event.image_file).await;
            activity::record(&state.db, format!("Deleted event: {}", event.title)).await;
            redirect_with_flash(jar, DASHBOARD, Flash::success("Event deleted."))
        }
        Ok(None) => redirect_with_flash(jar, DASHBOARD, Flash::error("Event not found")),
        Err(e) => redirect_with_error(jar, DASHBOARD, e),
    }
}

pub async fn event_registrations(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    let event = match events::get(&state.db, event_id).await {
        Ok(event) => event,
        Err(e) => return Ok(redirect_with_error(jar, DASHBOARD, e)),
    };
    let registrations = or_empty(
        registrations::list_for_event(&state.db, event_id).await,
        "registrations",
    );

    let (jar, flash) = take_flash(jar);
    let page = EventRegistrationsPage {
        flash,
        is_admin: true,
        event,
        registrations,
    };
    Ok((jar, render(&page)?).into_response())
}
