use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header;
use axum::Form;

use crate::models::FeedbackForm;
use crate::upload::UploadForm;
use crate::utils::error::AppError;

/// The `message` field of a feedback post, sent either urlencoded or as `multipart/form-data`.
#[derive(Debug)]
pub struct FeedbackMessage(pub String);

#[axum::async_trait]
impl<S> FromRequest<S> for FeedbackMessage
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("multipart/form-data"))
            .unwrap_or(false);

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            let form = UploadForm::from_multipart(multipart).await?;
            return Ok(Self(form.text("message")));
        }

        let Form(form) = Form::<FeedbackForm>::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        Ok(Self(form.message))
    }
}
