//! Session guard and identity extractors for protected routes

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, warn};

use crate::{
    error::ApiError,
    negotiation::{Failure, ResponseFormat},
    session::AuthUser,
    state::AppState,
};

pub const LOGIN_PAGE: &str = "/auth/login";
const LOGIN_NOTICE: &str = "Please log in or sign up to access this page.";

fn login_required(format: ResponseFormat) -> Failure {
    Failure::new(format, LOGIN_PAGE, ApiError::Unauthorized).with_notice(LOGIN_NOTICE)
}

/// Reject requests without a live session before the handler runs
pub async fn require_session(
    State(state): State<AppState>,
    format: ResponseFormat,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, Failure> {
    let user = state
        .sessions
        .current(&jar)
        .await
        .map_err(|e| Failure::new(format, LOGIN_PAGE, ApiError::Internal(e)))?;

    let Some(user) = user else {
        debug!("Rejected unauthenticated request to {}", req.uri().path());
        return Err(login_required(format));
    };

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Failure;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| login_required(ResponseFormat::from_headers(&parts.headers)))
    }
}

/// Authenticated caller holding the elevated role
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = Failure;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            warn!("User {} attempted an administrator operation", user.user_id);
            let format = ResponseFormat::from_headers(&parts.headers);
            return Err(Failure::new(format, "/vacations", ApiError::Forbidden));
        }

        Ok(AdminUser(user))
    }
}
