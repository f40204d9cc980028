use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Form;
use axum_extra::extract::cookie::SignedCookieJar;

use crate::extractors::AdminSession;
use crate::models::MaterialForm;
use crate::session::{take_flash, Flash};
use crate::state::AppState;
use crate::store::materials::{self, NewMaterial};
use crate::store::activity;
use crate::utils::error::AppError;
use crate::utils::response::{redirect_with_error, redirect_with_flash};
use crate::views::{render, EditMaterialPage};

const DASHBOARD: &str = "/dashboard";

pub async fn add_material(
    _admin: AdminSession,
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<MaterialForm>,
) -> Response {
    let created = async {
        let material = NewMaterial::try_from(&form)?;
        materials::create(&state.db, &material).await?;
        Ok::<_, AppError>(material.title)
    }
    .await;

    match created {
        Ok(title) => {
            activity::record(&state.db, format!("Added material: {title}")).await;
            redirect_with_flash(jar, DASHBOARD, Flash::success("Material added."))
        }
        Err(e) => redirect_with_error(jar, DASHBOARD, e),
    }
}

pub async fn edit_material_page(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    let material = match materials::get(&state.db, id).await {
        Ok(material) => material,
        Err(e) => return Ok(redirect_with_error(jar, DASHBOARD, e)),
    };

    let (jar, flash) = take_flash(jar);
    let page = EditMaterialPage {
        flash,
        is_admin: true,
        material,
    };
    Ok((jar, render(&page)?).into_response())
}

pub async fn edit_material(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: SignedCookieJar,
    Form(form): Form<MaterialForm>,
) -> Response {
    let updated = async {
        let material = NewMaterial::try_from(&form)?;
        materials::update(&state.db, id, &material).await?;
        Ok::<_, AppError>(material.title)
    }
    .await;

    match updated {
        Ok(title) => {
            activity::record(&state.db, format!("Edited material: {title}")).await;
            redirect_with_flash(jar, DASHBOARD, Flash::success("Material updated."))
        }
        Err(e) => redirect_with_error(jar, DASHBOARD, e),
    }
}

pub async fn delete_material(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: SignedCookieJar,
) -> Response {
    match materials::delete(&state.db, id).await {
        Ok(true) => {
            activity::record(&state.db, format!("Deleted material #{id}")).await;
            redirect_with_flash(jar, DASHBOARD, Flash::success("Material deleted."))
        }
        Ok(false) => redirect_with_flash(jar, DASHBOARD, Flash::error("Material not found")),
        Err(e) => redirect_with_error(jar, DASHBOARD, e),
    }
}
