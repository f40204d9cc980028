use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Serialize;

use crate::session::{set_flash, Flash};
use crate::utils::error::AppError;

/// Body of every JSON answer: `{ "success": bool, "message": string }`.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
    pub message: String,
}

pub fn ack(status: StatusCode, success: bool, message: impl Into<String>) -> Response {
    let body = Ack {
        success,
        message: message.into(),
    };
    (status, Json(body)).into_response()
}

/// Treats a request as AJAX when it says so, or when it asks for JSON.
pub fn wants_json(headers: &HeaderMap) -> bool {
    let requested_with = headers
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.eq_ignore_ascii_case("XMLHttpRequest"))
        .unwrap_or(false);

    let accepts_json = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false);

    requested_with || accepts_json
}

pub fn redirect_with_flash(jar: SignedCookieJar, to: &str, flash: Flash) -> Response {
    (set_flash(jar, flash), Redirect::to(to)).into_response()
}

/// Logs the error and turns it into a flashed message on the redirect target.
pub fn redirect_with_error(jar: SignedCookieJar, to: &str, err: AppError) -> Response {
    err.log();
    redirect_with_flash(jar, to, Flash::error(err.public_message()))
}

/// Read paths degrade to an empty listing when the store fails.
pub fn or_empty<T>(result: Result<Vec<T>, AppError>, what: &str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::error!(error = %e, listing = what, "Listing failed, rendering empty");
        Vec::new()
    })
}
