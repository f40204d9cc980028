use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use sqlx::SqlitePool;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<Config>,
    key: Key,
}

impl AppState {
    pub fn new(db: SqlitePool, config: Config) -> Self {
        let key = cookie_key(config.secret_key.as_deref());
        Self {
            db,
            config: Arc::new(config),
            key,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

/// Signing key for session cookies. A SHA-512 digest stretches any secret to the 64 bytes `Key` needs.
fn cookie_key(secret: Option<&str>) -> Key {
    match secret {
        Some(secret) => Key::from(Sha512::digest(secret.as_bytes()).as_slice()),
        None => {
            tracing::warn!("SECRET_KEY not set; sessions will not survive a restart");
            Key::generate()
        }
    }
}
