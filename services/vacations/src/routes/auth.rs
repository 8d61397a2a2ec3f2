//! Login, signup and logout handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::json;

use crate::{
    accounts,
    middleware::LOGIN_PAGE,
    models::{LoginCredentials, NewUser, Role},
    negotiation::{Failure, Negotiate, ResponseFormat, redirect_with_notice, take_flash},
    payload::Payload,
    render,
    session::AuthUser,
    state::AppState,
};

const SIGNUP_PAGE: &str = "/auth/signup";

/// Signup body; missing text fields arrive empty and fail validation
#[derive(Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role_id: Option<i32>,
}

impl From<SignupForm> for NewUser {
    fn from(form: SignupForm) -> Self {
        let role = match form.role_id {
            Some(id) if id == Role::Admin.id() => Role::Admin,
            _ => Role::Member,
        };

        NewUser {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            password: form.password,
            role,
        }
    }
}

pub async fn login_page(jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = take_flash(jar);
    (jar, Html(render::login_page(flash.as_deref())))
}

pub async fn signup_page(jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = take_flash(jar);
    (jar, Html(render::signup_page(flash.as_deref())))
}

/// Verify credentials and start a fresh session
pub async fn login(
    State(state): State<AppState>,
    format: ResponseFormat,
    jar: CookieJar,
    Payload(credentials): Payload<LoginCredentials>,
) -> Result<Response, Failure> {
    let stored = accounts::authenticate(state.users.as_ref(), &credentials)
        .await
        .or_redirect(format, LOGIN_PAGE)?;

    let user = AuthUser::from(&stored);
    let jar = state
        .sessions
        .establish(jar, &user)
        .await
        .or_redirect(format, LOGIN_PAGE)?;

    Ok(match format {
        ResponseFormat::Json => (
            jar,
            Json(json!({
                "success": true,
                "message": "Logged in successfully",
                "user": {
                    "id": user.user_id,
                    "name": user.display_name,
                    "role_id": user.role_id,
                },
            })),
        )
            .into_response(),
        ResponseFormat::Html => redirect_with_notice(jar, "/vacations", "Logged in successfully"),
    })
}

/// Self-registration; never grants the elevated role
pub async fn signup(
    State(state): State<AppState>,
    format: ResponseFormat,
    jar: CookieJar,
    Payload(form): Payload<SignupForm>,
) -> Result<Response, Failure> {
    let user = accounts::register(state.users.as_ref(), NewUser::from(form))
        .await
        .or_redirect(format, SIGNUP_PAGE)?;

    Ok(match format {
        ResponseFormat::Json => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "message": "User registered successfully",
                "first_name": user.first_name,
                "last_name": user.last_name,
                "email": user.email,
                "role_id": user.role_id,
            })),
        )
            .into_response(),
        ResponseFormat::Html => redirect_with_notice(jar, LOGIN_PAGE, "SignUp Successfully"),
    })
}

/// End the caller's session
pub async fn logout(
    State(state): State<AppState>,
    format: ResponseFormat,
    user: AuthUser,
    jar: CookieJar,
) -> Result<Response, Failure> {
    let jar = state.sessions.end(jar).await.or_redirect(format, "/vacations")?;
    tracing::info!("User {} logged out", user.user_id);

    Ok(match format {
        ResponseFormat::Json => (
            jar,
            Json(json!({
                "success": true,
                "message": "Logged out successfully",
            })),
        )
            .into_response(),
        ResponseFormat::Html => redirect_with_notice(jar, LOGIN_PAGE, "Logged out successfully"),
    })
}
