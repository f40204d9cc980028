use axum::extract::{Multipart, Path, State};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::extractors::AdminSession;
use crate::session::{take_flash, Flash};
use crate::state::AppState;
use crate::handlers::discard_unused_image;
use crate::store::{activity, gallery};
use crate::upload::{self, UploadForm};
use crate::utils::error::AppError;
use crate::utils::response::{redirect_with_error, redirect_with_flash};
use crate::views::{render, EditPhotoPage};

const DASHBOARD: &str = "/dashboard";

pub async fn upload_photo(
    _admin: AdminSession,
    State(state): State<AppState>,
    jar: SignedCookieJar,
    multipart: Multipart,
) -> Response {
    let uploaded = async {
        let form = UploadForm::from_multipart(multipart).await?;
        let image = form
            .image
            .as_ref()
            .ok_or_else(|| AppError::Upload("Please choose an image to upload".into()))?;

        // A rejected extension fails here, before any row exists.
        let file_name = upload::save_image(&state.config.upload_dir, image).await?;
        if let Err(e) = gallery::create(&state.db, &file_name, &form.text("caption")).await {
            discard_unused_image(&state, &file_name).await;
            return Err(e);
        }
        Ok::<_, AppError>(file_name)
    }
    .await;

    match uploaded {
        Ok(file_name) => {
            activity::record(&state.db, format!("Uploaded photo: {file_name}")).await;
            redirect_with_flash(jar, DASHBOARD, Flash::success("Photo uploaded."))
        }
        Err(e) => redirect_with_error(jar, DASHBOARD, e),
    }
}

pub async fn edit_photo_page(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    let photo = match gallery::get(&state.db, id).await {
        Ok(photo) => photo,
        Err(e) => return Ok(redirect_with_error(jar, DASHBOARD, e)),
    };

    let (jar, flash) = take_flash(jar);
    let page = EditPhotoPage {
        flash,
        is_admin: true,
        photo,
    };
    Ok((jar, render(&page)?).into_response())
}

pub async fn edit_photo(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: SignedCookieJar,
    multipart: Multipart,
) -> Response {
    let updated = async {
        let previous = gallery::get(&state.db, id).await?;
        let form = UploadForm::from_multipart(multipart).await?;
        let caption = form.text("caption");
        let Some(image) = &form.image else {
            gallery::update(&state.db, id, &caption, None).await?;
            return Ok::<_, AppError>(());
        };

        let file_name = upload::save_image(&state.config.upload_dir, image).await?;
        let replaced = file_name != previous.image_file;
        if let Err(e) = gallery::update(&state.db, id, &caption, Some(file_name.as_str())).await {
            if replaced {
                discard_unused_image(&state, &file_name).await;
            }
            return Err(e);
        }
        if replaced {
            discard_unused_image(&state, &previous.image_file).await;
        }
        Ok(())
    }
    .await;

    match updated {
        Ok(()) => {
            activity::record(&state.db, format!("Edited photo #{id}")).await;
            redirect_with_flash(jar, DASHBOARD, Flash::success("Photo updated."))
        }
        Err(e) => redirect_with_error(jar, DASHBOARD, e),
    }
}

pub async fn delete_photo(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: SignedCookieJar,
) -> Response {
    match gallery::delete(&state.db, id).await {
        Ok(Some(photo)) => {
            discard_unused_image(&state, &photo.image_file).await;
            activity::record(&state.db, format!("Deleted photo: {}", photo.image_file)).await;
            redirect_with_flash(jar, DASHBOARD, Flash::success("Photo deleted."))
        }
        Ok(None) => redirect_with_flash(jar, DASHBOARD, Flash::error("Photo not found")),
        Err(e) => redirect_with_error(jar, DASHBOARD, e),
    }
}
