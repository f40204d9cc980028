use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Upload rejected: {0}")]
    Upload(String),

    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("File system error")]
    Io(#[from] std::io::Error),

    #[error("Template error")]
    Template(#[from] askama::Error),

    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Upload(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_)
            | AppError::Migration(_)
            | AppError::Io(_)
            | AppError::Template(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Upload(_) => "UPLOAD_REJECTED",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Migration(_) => "MIGRATION_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Template(_) => "TEMPLATE_ERROR",
            AppError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Message safe to show a visitor. Store and file system detail stays in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::Upload(msg) => msg.clone(),
            AppError::Database(_)
            | AppError::Migration(_)
            | AppError::Io(_)
            | AppError::Template(_)
            | AppError::Internal(_) => "Operation failed. Please try again.".to_string(),
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    pub fn log(&self) {
        match self {
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::Upload(msg) => {
                warn!(code = self.code(), message = %msg, "Request rejected");
            }
            AppError::Internal(msg) => {
                error!(message = %msg, "Internal error");
            }
            AppError::Database(e) => {
                error!(error = ?e, "Database error");
            }
            AppError::Migration(e) => {
                error!(error = ?e, "Migration error");
            }
            AppError::Io(e) => {
                error!(error = ?e, "File system error");
            }
            AppError::Template(e) => {
                error!(error = ?e, "Template error");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        self.log();

        // Rendered without a template so a broken template can still report itself.
        let body = format!(
            "<!doctype html><html><head><title>{status}</title></head>\
             <body><h1>{status}</h1><p>{}</p><p><a href=\"/\">Back to home</a></p></body></html>",
            escape_html(&self.public_message()),
        );

        (status, Html(body)).into_response()
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
