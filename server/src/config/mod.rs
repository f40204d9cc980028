use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub mod security;

pub use security::create_security_headers_layer;

const DEFAULT_DATABASE_URL: &str = "sqlite://portal.db?mode=rwc";
const DEFAULT_UPLOAD_DIR: &str = "static/uploads";
const DEFAULT_MAX_UPLOAD_MB: usize = 16;

/// Replacement credentials for the seeded admin row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub upload_dir: PathBuf,
    pub secret_key: Option<String>,
    pub admin: Option<AdminCredentials>,
    pub max_upload_bytes: usize,
    pub production: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unparsable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = non_empty("BIND_ADDR")
            .and_then(|raw| match raw.parse::<SocketAddr>() {
                Ok(addr) => Some(addr),
                Err(e) => {
                    tracing::warn!("Config: invalid BIND_ADDR '{}': {}", raw, e);
                    None
                }
            })
            .unwrap_or_else(default_bind_addr);

        let max_upload_bytes = non_empty("MAX_UPLOAD_MB")
            .and_then(|raw| match raw.trim().parse::<usize>() {
                Ok(mb) if mb > 0 => mb.checked_mul(1024 * 1024).or_else(|| {
                    tracing::warn!("Config: MAX_UPLOAD_MB '{}' is too large", raw);
                    None
                }),
                _ => {
                    tracing::warn!("Config: invalid MAX_UPLOAD_MB '{}'", raw);
                    None
                }
            })
            .unwrap_or(DEFAULT_MAX_UPLOAD_MB * 1024 * 1024);

        let admin = match (non_empty("ADMIN_USERNAME"), non_empty("ADMIN_PASSWORD")) {
            (Some(username), Some(password)) => Some(AdminCredentials { username, password }),
            (None, None) => None,
            _ => {
                tracing::warn!(
                    "Config: ADMIN_USERNAME and ADMIN_PASSWORD must be set together, ignoring"
                );
                None
            }
        };

        Self {
            database_url: non_empty("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            bind_addr,
            upload_dir: non_empty("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            secret_key: non_empty("SECRET_KEY"),
            admin,
            max_upload_bytes,
            production: lookup("RUST_ENV")
                .map(|v| v.to_lowercase() == "production")
                .unwrap_or(false),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3001))
}
