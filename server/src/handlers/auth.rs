use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::SignedCookieJar;

use crate::models::LoginForm;
use crate::session::{self, take_flash};
use crate::state::AppState;
use crate::store::{activity, users};
use crate::utils::error::AppError;
use crate::views::{render, LoginPage};

pub async fn login_page(jar: SignedCookieJar) -> Result<Response, AppError> {
    let (jar, flash) = take_flash(jar);
    let page = LoginPage {
        flash,
        is_admin: session::is_admin(&jar),
        invalid: false,
        username: String::new(),
    };
    Ok((jar, render(&page)?).into_response())
}

pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match users::authenticate(&state.db, &form.username, &form.password).await? {
        Some(user) => {
            activity::record(&state.db, format!("User logged in: {}", user.username)).await;
            tracing::info!(username = %user.username, "Admin logged in");

            let jar = session::sign_in(jar);
            Ok((jar, Redirect::to("/dashboard")).into_response())
        }
        None => {
            activity::record(&state.db, format!("Failed login attempt for: {}", form.username))
                .await;
            tracing::warn!(username = %form.username, "Failed login attempt");

            let page = LoginPage {
                flash: None,
                is_admin: false,
                invalid: true,
                username: form.username,
            };
            Ok(render(&page)?.into_response())
        }
    }
}

pub async fn logout(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    if session::is_admin(&jar) {
        activity::record(&state.db, "User logged out").await;
    }
    (session::sign_out(jar), Redirect::to("/")).into_response()
}
