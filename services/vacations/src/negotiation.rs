//! Response format selection and the page-redirect surface
//!
//! Every handler answers either a structured JSON body or, for browser
//! callers, a redirect carrying a one-shot notice in the `flash` cookie.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{
        HeaderMap,
        header::{ACCEPT, CONTENT_TYPE},
        request::Parts,
    },
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::error::ApiError;

pub const FLASH_COOKIE: &str = "flash";

/// Representation requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Html,
}

impl ResponseFormat {
    /// JSON when the body is JSON or the caller prefers JSON over HTML;
    /// ties, including a missing `Accept`, go to JSON.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        if has_json_body(headers) {
            return ResponseFormat::Json;
        }

        let accept = headers
            .get(ACCEPT)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if quality(accept, "application/json") >= quality(accept, "text/html") {
            ResponseFormat::Json
        } else {
            ResponseFormat::Html
        }
    }

    pub fn is_json(self) -> bool {
        self == ResponseFormat::Json
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ResponseFormat::from_headers(&parts.headers))
    }
}

/// Whether the request body is declared as JSON
pub fn has_json_body(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false)
}

/// Quality the `Accept` header assigns to `mime`; the most specific
/// matching range decides, and an unmatched type scores zero.
fn quality(accept: &str, mime: &str) -> f32 {
    let (kind, _) = mime.split_once('/').unwrap_or((mime, ""));
    let mut best: Option<(u8, f32)> = None;

    for range in accept.split(',') {
        let mut params = range.split(';');
        let candidate = params.next().unwrap_or_default().trim().to_ascii_lowercase();
        if candidate.is_empty() {
            continue;
        }

        let specificity = if candidate == mime {
            2
        } else if candidate == format!("{}/*", kind) {
            1
        } else if candidate == "*/*" {
            0
        } else {
            continue;
        };

        let q = params
            .filter_map(|param| param.trim().strip_prefix("q="))
            .find_map(|value| value.trim().parse::<f32>().ok())
            .unwrap_or(1.0)
            .clamp(0.0, 1.0);

        if best.is_none_or(|(current, _)| specificity > current) {
            best = Some((specificity, q));
        }
    }

    best.map(|(_, q)| q).unwrap_or(0.0)
}

/// Add a one-shot notice for the next page render
pub fn set_flash(jar: CookieJar, message: impl Into<String>) -> CookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, message.into()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build(),
    )
}

/// Read and clear the pending notice
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<String>) {
    let message = jar
        .get(FLASH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty());

    match message {
        Some(message) => (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), Some(message)),
        None => (jar, None),
    }
}

/// Redirect with a notice; axum's `Redirect::to` answers 303 See Other
pub fn redirect_with_notice(jar: CookieJar, to: &str, message: impl Into<String>) -> Response {
    (set_flash(jar, message), Redirect::to(to)).into_response()
}

/// Error outcome rendered for the caller's format
#[derive(Debug)]
pub struct Failure {
    format: ResponseFormat,
    redirect_to: &'static str,
    notice: Option<String>,
    error: ApiError,
}

impl Failure {
    pub fn new(format: ResponseFormat, redirect_to: &'static str, error: impl Into<ApiError>) -> Self {
        Self {
            format,
            redirect_to,
            notice: None,
            error: error.into(),
        }
    }

    /// Page notice shown instead of the error message
    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }

    pub fn error(&self) -> &ApiError {
        &self.error
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        match self.format {
            ResponseFormat::Json => self.error.into_response(),
            ResponseFormat::Html => {
                let message = self.notice.unwrap_or_else(|| self.error.user_message());
                redirect_with_notice(CookieJar::new(), self.redirect_to, message)
            }
        }
    }
}

/// Attach a response format and redirect target to a fallible result
pub trait Negotiate<T> {
    fn or_redirect(self, format: ResponseFormat, redirect_to: &'static str) -> Result<T, Failure>;
}

impl<T, E> Negotiate<T> for Result<T, E>
where
    E: Into<ApiError>,
{
    fn or_redirect(self, format: ResponseFormat, redirect_to: &'static str) -> Result<T, Failure> {
        self.map_err(|error| Failure::new(format, redirect_to, error))
    }
}
