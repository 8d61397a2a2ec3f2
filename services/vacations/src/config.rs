//! Server configuration loaded from the environment

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

use crate::session::SessionSettings;

/// HTTP server and session cookie settings
///
/// # Environment Variables
/// - `VACATIONS_BIND_ADDRESS` (default: "0.0.0.0:3000")
/// - `VACATIONS_SESSION_COOKIE` (default: "vacations_session")
/// - `VACATIONS_SESSION_TTL_SECONDS` (default: 86400)
/// - `VACATIONS_SECURE_COOKIES` (default: false)
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub session_cookie: String,
    pub session_ttl_seconds: u64,
    pub secure_cookies: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let settings = Config::builder()
            .set_default("bind_address", "0.0.0.0:3000")?
            .set_default("session_cookie", "vacations_session")?
            .set_default("session_ttl_seconds", 86_400)?
            .set_default("secure_cookies", false)?
            .add_source(Environment::with_prefix("VACATIONS").try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            cookie_name: self.session_cookie.clone(),
            ttl_seconds: self.session_ttl_seconds,
            secure_cookies: self.secure_cookies,
        }
    }
}
