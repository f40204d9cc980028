//! Cookie-backed session state: the admin flag and one-shot flash messages.
//!
//! Both cookies are signed with the application [`Key`](axum_extra::extract::cookie::Key),
//! so a visitor can read but never forge them.

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use serde::{Deserialize, Serialize};

pub const ADMIN_COOKIE: &str = "portal_admin";
pub const FLASH_COOKIE: &str = "portal_flash";

const ADMIN_FLAG: &str = "1";
const MAX_FLASH_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Warning,
    Error,
}

impl FlashKind {
    /// CSS class used by the templates.
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Warning => "warning",
            FlashKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    /// Long messages are clipped so the signed cookie stays well under browser limits.
    fn new(kind: FlashKind, mut message: String) -> Self {
        if let Some((cut, _)) = message.char_indices().nth(MAX_FLASH_CHARS) {
            message.truncate(cut);
            message.push_str("...");
        }
        Self { kind, message }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashKind::Success, message.into())
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(FlashKind::Warning, message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(FlashKind::Error, message.into())
    }

    // Cookie values cannot carry spaces, quotes or semicolons; hex-encoded JSON carries none.
    fn encode(&self) -> String {
        hex::encode(serde_json::to_vec(self).unwrap_or_default())
    }

    fn decode(raw: &str) -> Option<Self> {
        let bytes = hex::decode(raw).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

pub fn is_admin(jar: &SignedCookieJar) -> bool {
    jar.get(ADMIN_COOKIE)
        .map(|cookie| cookie.value() == ADMIN_FLAG)
        .unwrap_or(false)
}

/// Sets the admin flag. No `Max-Age`, so it lasts for the browser session.
/// The security layer adds `Secure` to every cookie in production.
pub fn sign_in(jar: SignedCookieJar) -> SignedCookieJar {
    jar.add(
        Cookie::build((ADMIN_COOKIE, ADMIN_FLAG))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

pub fn sign_out(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(Cookie::build((ADMIN_COOKIE, "")).path("/"))
}

pub fn set_flash(jar: SignedCookieJar, flash: Flash) -> SignedCookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.encode()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Reads the pending flash, if any, and schedules its removal.
pub fn take_flash(jar: SignedCookieJar) -> (SignedCookieJar, Option<Flash>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };
    let flash = Flash::decode(cookie.value());
    let jar = jar.remove(Cookie::build((FLASH_COOKIE, "")).path("/"));
    (jar, flash)
}
