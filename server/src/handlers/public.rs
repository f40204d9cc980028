use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::session::{is_admin, take_flash};
use crate::state::AppState;
use crate::store::{events, gallery, materials};
use crate::utils::error::AppError;
use crate::utils::response::or_empty;
use crate::views::{render, EventsPage, GalleryPage, IndexPage, MaterialsPage};

const HOME_EVENTS: i64 = 3;
const HOME_PHOTOS: i64 = 6;

pub async fn home(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    let (jar, flash) = take_flash(jar);
    let page = IndexPage {
        flash,
        is_admin: is_admin(&jar),
        events: or_empty(events::recent(&state.db, HOME_EVENTS).await, "recent events"),
        photos: or_empty(gallery::recent(&state.db, HOME_PHOTOS).await, "recent photos"),
    };
    Ok((jar, render(&page)?).into_response())
}

pub async fn events_page(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    let (jar, flash) = take_flash(jar);
    let page = EventsPage {
        flash,
        is_admin: is_admin(&jar),
        events: or_empty(events::list(&state.db).await, "events"),
    };
    Ok((jar, render(&page)?).into_response())
}

pub async fn gallery_page(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    let (jar, flash) = take_flash(jar);
    let page = GalleryPage {
        flash,
        is_admin: is_admin(&jar),
        photos: or_empty(gallery::list(&state.db).await, "gallery"),
    };
    Ok((jar, render(&page)?).into_response())
}

pub async fn materials_page(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    let (jar, flash) = take_flash(jar);
    let page = MaterialsPage {
        flash,
        is_admin: is_admin(&jar),
        materials: or_empty(materials::list(&state.db).await, "materials"),
    };
    Ok((jar, render(&page)?).into_response())
}
