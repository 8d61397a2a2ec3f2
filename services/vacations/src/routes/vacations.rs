//! Vacation listing, management and like handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use tracing::info;

use crate::{
    error::ApiError,
    middleware::{AdminUser, LOGIN_PAGE},
    models::{NewVacation, VacationPatch},
    negotiation::{Failure, Negotiate, ResponseFormat, redirect_with_notice, take_flash},
    payload::Payload,
    render,
    session::AuthUser,
    state::AppState,
    validation::{ensure_country_exists, validate_new_vacation, validate_vacation_update},
};

const LIST_PAGE: &str = "/vacations";

/// All vacations with like counts and the caller's own likes
pub async fn list_vacations(
    State(state): State<AppState>,
    format: ResponseFormat,
    user: AuthUser,
    jar: CookieJar,
) -> Result<Response, Failure> {
    let current = state
        .users
        .find_by_id(user.user_id)
        .await
        .or_redirect(format, LOGIN_PAGE)?
        .ok_or(ApiError::NotFound("User"))
        .or_redirect(format, LOGIN_PAGE)?;

    let summaries = state
        .vacations
        .list_for_viewer(current.id)
        .await
        .or_redirect(format, LOGIN_PAGE)?;

    Ok(match format {
        ResponseFormat::Json => Json(json!({
            "success": true,
            "user": {
                "id": current.id,
                "name": current.display_name(),
            },
            "vacations": summaries,
        }))
        .into_response(),
        ResponseFormat::Html => {
            let (jar, flash) = take_flash(jar);
            let page = render::vacations_page(
                &current.display_name(),
                user.is_admin(),
                &summaries,
                flash.as_deref(),
            );
            (jar, Html(page)).into_response()
        }
    })
}

/// Country choices for the vacation forms
pub async fn list_countries(
    State(state): State<AppState>,
    format: ResponseFormat,
) -> Result<Response, Failure> {
    let countries = state
        .countries
        .list_all()
        .await
        .or_redirect(format, LIST_PAGE)?;

    Ok(Json(json!({
        "success": true,
        "countries": countries,
    }))
    .into_response())
}

pub async fn get_vacation(
    State(state): State<AppState>,
    format: ResponseFormat,
    Path(id): Path<i32>,
) -> Result<Response, Failure> {
    let vacation = state
        .vacations
        .find_by_id(id)
        .await
        .or_redirect(format, LIST_PAGE)?
        .ok_or(ApiError::NotFound("Vacation"))
        .or_redirect(format, LIST_PAGE)?;

    Ok(Json(json!({
        "success": true,
        "vacation": vacation,
    }))
    .into_response())
}

/// Add a vacation (administrators only)
pub async fn create_vacation(
    State(state): State<AppState>,
    format: ResponseFormat,
    AdminUser(admin): AdminUser,
    jar: CookieJar,
    Payload(candidate): Payload<NewVacation>,
) -> Result<Response, Failure> {
    validate_new_vacation(state.vacations.as_ref(), &candidate)
        .await
        .or_redirect(format, LIST_PAGE)?;
    ensure_country_exists(state.countries.as_ref(), candidate.country_id)
        .await
        .or_redirect(format, LIST_PAGE)?;

    let vacation = state
        .vacations
        .insert(&candidate)
        .await
        .or_redirect(format, LIST_PAGE)?;
    info!("User {} added vacation {}", admin.user_id, vacation.id);

    Ok(match format {
        ResponseFormat::Json => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "vacation": vacation,
            })),
        )
            .into_response(),
        ResponseFormat::Html => redirect_with_notice(jar, LIST_PAGE, "Vacation added successfully"),
    })
}

/// Partial update (administrators only); absent fields are left untouched
pub async fn update_vacation(
    State(state): State<AppState>,
    format: ResponseFormat,
    AdminUser(admin): AdminUser,
    Path(id): Path<i32>,
    jar: CookieJar,
    Payload(patch): Payload<VacationPatch>,
) -> Result<Response, Failure> {
    let existing = state
        .vacations
        .find_by_id(id)
        .await
        .or_redirect(format, LIST_PAGE)?
        .ok_or(ApiError::NotFound("Vacation"))
        .or_redirect(format, LIST_PAGE)?;

    let fields = patch.into_fields();
    if fields.is_empty() {
        return Err(Failure::new(
            format,
            LIST_PAGE,
            ApiError::BadRequest("No fields to update.".to_string()),
        ));
    }

    let updated = validate_vacation_update(&existing, &fields).or_redirect(format, LIST_PAGE)?;
    if updated.country_id != existing.country_id {
        ensure_country_exists(state.countries.as_ref(), updated.country_id)
            .await
            .or_redirect(format, LIST_PAGE)?;
    }

    let found = state
        .vacations
        .update_fields(id, &fields)
        .await
        .or_redirect(format, LIST_PAGE)?;
    if !found {
        return Err(Failure::new(format, LIST_PAGE, ApiError::NotFound("Vacation")));
    }
    info!("User {} updated vacation {}", admin.user_id, id);

    Ok(match format {
        ResponseFormat::Json => Json(json!({
            "success": true,
            "vacation": updated,
        }))
        .into_response(),
        ResponseFormat::Html => {
            redirect_with_notice(jar, LIST_PAGE, "Vacation updated successfully")
        }
    })
}

/// Remove a vacation and its likes (administrators only)
pub async fn delete_vacation(
    State(state): State<AppState>,
    format: ResponseFormat,
    AdminUser(admin): AdminUser,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> Result<Response, Failure> {
    let removed = state
        .vacations
        .delete_with_likes(id)
        .await
        .or_redirect(format, LIST_PAGE)?;
    if !removed {
        return Err(Failure::new(format, LIST_PAGE, ApiError::NotFound("Vacation")));
    }
    info!("User {} deleted vacation {}", admin.user_id, id);

    Ok(match format {
        ResponseFormat::Json => Json(json!({
            "success": true,
            "message": "Vacation deleted successfully",
        }))
        .into_response(),
        ResponseFormat::Html => {
            redirect_with_notice(jar, LIST_PAGE, "Vacation deleted successfully")
        }
    })
}

/// Like the vacation, or remove the caller's like if present
pub async fn toggle_like(
    State(state): State<AppState>,
    format: ResponseFormat,
    user: AuthUser,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> Result<Response, Failure> {
    state
        .vacations
        .find_by_id(id)
        .await
        .or_redirect(format, LIST_PAGE)?
        .ok_or(ApiError::NotFound("Vacation"))
        .or_redirect(format, LIST_PAGE)?;

    let outcome = state
        .likes
        .toggle(user.user_id, id)
        .await
        .or_redirect(format, LIST_PAGE)?;

    Ok(match format {
        ResponseFormat::Json => Json(json!({
            "success": true,
            "message": outcome.notice(),
            "vacation": {
                "id": id,
                "user_liked": outcome.is_liked(),
            },
        }))
        .into_response(),
        ResponseFormat::Html => redirect_with_notice(jar, LIST_PAGE, outcome.notice()),
    })
}
