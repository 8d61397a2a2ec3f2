//! Server-side sessions keyed by an opaque cookie token

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use common::cache::RedisPool;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{Role, UserCredentials};

/// Identity carried by an authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: i32,
    pub display_name: String,
    pub role_id: i32,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role_id == Role::Admin.id()
    }
}

impl From<&UserCredentials> for AuthUser {
    fn from(user: &UserCredentials) -> Self {
        Self {
            user_id: user.id,
            display_name: user.display_name(),
            role_id: user.role_id,
        }
    }
}

/// Backend holding session records between requests
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, token: &str) -> Result<Option<AuthUser>>;
    async fn save(&self, token: &str, user: &AuthUser, ttl_seconds: u64) -> Result<()>;
    async fn destroy(&self, token: &str) -> Result<()>;
}

/// Redis-backed session store; records expire with their TTL
#[derive(Clone)]
pub struct RedisSessionStore {
    redis_pool: RedisPool,
}

impl RedisSessionStore {
    pub fn new(redis_pool: RedisPool) -> Self {
        Self { redis_pool }
    }

    fn session_key(token: &str) -> String {
        format!("session:{}", token)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, token: &str) -> Result<Option<AuthUser>> {
        let Some(raw) = self.redis_pool.get(&Self::session_key(token)).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!("Discarding unreadable session record: {}", e);
                Ok(None)
            }
        }
    }

    async fn save(&self, token: &str, user: &AuthUser, ttl_seconds: u64) -> Result<()> {
        let payload = serde_json::to_string(user)?;
        self.redis_pool
            .set_ex(&Self::session_key(token), &payload, ttl_seconds)
            .await
    }

    async fn destroy(&self, token: &str) -> Result<()> {
        self.redis_pool.delete(&Self::session_key(token)).await
    }
}

/// Settings for the session cookie
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub ttl_seconds: u64,
    pub secure_cookies: bool,
}

/// Issues, resolves and revokes sessions on behalf of handlers
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    settings: SessionSettings,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, settings: SessionSettings) -> Self {
        Self { store, settings }
    }

    fn token<'a>(&self, jar: &'a CookieJar) -> Option<&'a str> {
        jar.get(&self.settings.cookie_name)
            .map(|cookie| cookie.value())
            .filter(|value| !value.is_empty())
    }

    fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((self.settings.cookie_name.clone(), token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.settings.secure_cookies)
            .build()
    }

    /// Identity bound to the request's session cookie, if any
    pub async fn current(&self, jar: &CookieJar) -> Result<Option<AuthUser>> {
        match self.token(jar) {
            Some(token) => self.store.load(token).await,
            None => Ok(None),
        }
    }

    /// Start a session for `user`, replacing any session the caller held
    pub async fn establish(&self, jar: CookieJar, user: &AuthUser) -> Result<CookieJar> {
        if let Some(previous) = self.token(&jar) {
            self.store.destroy(previous).await?;
        }

        let token = Uuid::new_v4().to_string();
        self.store
            .save(&token, user, self.settings.ttl_seconds)
            .await?;
        info!("Session established for user {}", user.user_id);

        Ok(jar.add(self.session_cookie(token)))
    }

    /// Revoke the caller's session and clear the cookie
    pub async fn end(&self, jar: CookieJar) -> Result<CookieJar> {
        if let Some(token) = self.token(&jar) {
            self.store.destroy(token).await?;
        }

        Ok(jar.remove(Cookie::build(self.settings.cookie_name.clone()).path("/")))
    }
}
