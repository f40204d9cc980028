use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::Redirect;
use axum_extra::extract::cookie::{Key, SignedCookieJar};

use crate::session;

/// Proof that the request carries a valid admin session.
///
/// Add this as a handler parameter to make the route admin-only. Requests without the
/// session flag are redirected to `/login` before the handler runs.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::<Key>::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never: Infallible| match never {});

        if session::is_admin(&jar) {
            Ok(AdminSession)
        } else {
            tracing::debug!(path = %parts.uri.path(), "Admin session missing, redirecting to login");
            Err(Redirect::to("/login"))
        }
    }
}
