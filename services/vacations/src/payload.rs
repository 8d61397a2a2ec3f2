//! Request bodies accepted as JSON or as urlencoded forms

use axum::{
    Form, Json, async_trait,
    extract::{FromRequest, Request},
    http::header::REFERER,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::ApiError,
    negotiation::{Failure, ResponseFormat, has_json_body},
};

/// Body extractor choosing the decoder from `Content-Type`
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = Failure;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let format = ResponseFormat::from_headers(req.headers());
        let back = referer_path(req.headers().get(REFERER).and_then(|v| v.to_str().ok()));

        let decoded = if has_json_body(req.headers()) {
            Json::<T>::from_request(req, state)
                .await
                .map(|Json(value)| value)
                .map_err(|rejection| rejection.body_text())
        } else {
            Form::<T>::from_request(req, state)
                .await
                .map(|Form(value)| value)
                .map_err(|rejection| rejection.body_text())
        };

        decoded.map(Payload).map_err(|message| {
            debug!("Rejected request body: {}", message);
            Failure::new(format, back, ApiError::BadRequest(message))
        })
    }
}

/// Known page to return to after an unreadable form submission
fn referer_path(referer: Option<&str>) -> &'static str {
    match referer {
        Some(value) if value.contains("/auth/signup") => "/auth/signup",
        Some(value) if value.contains("/auth/login") => "/auth/login",
        _ => "/vacations",
    }
}
