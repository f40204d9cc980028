use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Form;
use axum_extra::extract::cookie::SignedCookieJar;

use crate::models::RegistrationForm;
use crate::session::{is_admin, take_flash, Flash};
use crate::state::AppState;
use crate::store::registrations::{self, RegistrationOutcome};
use crate::store::{activity, events};
use crate::utils::error::AppError;
use crate::utils::response::{redirect_with_error, redirect_with_flash};
use crate::views::{render, RegistrationPage, RegistrationSuccessPage};

const EVENTS: &str = "/events";
const EVENT_NOT_FOUND: &str = "Event not found";

pub async fn register_page(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    let event = match events::find(&state.db, event_id).await {
        Ok(Some(event)) => event,
        Ok(None) => return Ok(redirect_with_flash(jar, EVENTS, Flash::error(EVENT_NOT_FOUND))),
        Err(e) => return Ok(redirect_with_error(jar, EVENTS, e)),
    };

    let (jar, flash) = take_flash(jar);
    let page = RegistrationPage {
        flash,
        is_admin: is_admin(&jar),
        event,
        form: RegistrationForm::default(),
        already_registered: false,
    };
    Ok((jar, render(&page)?).into_response())
}

pub async fn register(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    jar: SignedCookieJar,
    Form(form): Form<RegistrationForm>,
) -> Result<Response, AppError> {
    let event = match events::find(&state.db, event_id).await {
        Ok(Some(event)) => event,
        Ok(None) => return Ok(redirect_with_flash(jar, EVENTS, Flash::error(EVENT_NOT_FOUND))),
        Err(e) => return Ok(redirect_with_error(jar, EVENTS, e)),
    };

    let (flash, already_registered) = match registrations::register(&state.db, event_id, &form).await {
        Ok(RegistrationOutcome::Registered(id)) => {
            let name = form.name.trim();
            tracing::info!(event_id, registration_id = id, "Registration recorded");
            activity::record(
                &state.db,
                format!("New registration for event '{}' by {}", event.title, name),
            )
            .await;
            return Ok(redirect_with_flash(
                jar,
                &format!("/registration-success/{event_id}"),
                Flash::success("Registration successful! See you at the event."),
            ));
        }
        Ok(RegistrationOutcome::AlreadyRegistered) => (
            Flash::warning("You have already registered for this event!"),
            true,
        ),
        Err(AppError::Validation(message)) => (Flash::error(message), false),
        Err(AppError::NotFound(_)) => {
            return Ok(redirect_with_flash(jar, EVENTS, Flash::error(EVENT_NOT_FOUND)));
        }
        Err(e) => return Ok(redirect_with_error(jar, &format!("/register/{event_id}"), e)),
    };

    let page = RegistrationPage {
        flash: Some(flash),
        is_admin: is_admin(&jar),
        event,
        form: form.trimmed(),
        already_registered,
    };
    Ok((jar, render(&page)?).into_response())
}

pub async fn registration_success(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    let event = match events::find(&state.db, event_id).await {
        Ok(Some(event)) => event,
        Ok(None) => return Ok(redirect_with_flash(jar, EVENTS, Flash::error(EVENT_NOT_FOUND))),
        Err(e) => return Ok(redirect_with_error(jar, EVENTS, e)),
    };

    let (jar, flash) = take_flash(jar);
    let page = RegistrationSuccessPage {
        flash,
        is_admin: is_admin(&jar),
        event,
    };
    Ok((jar, render(&page)?).into_response())
}
