//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    repositories::{
        CountryRepository, LikeRepository, PgCountryRepository, PgLikeRepository,
        PgUserRepository, PgVacationRepository, UserRepository, VacationRepository,
    },
    session::SessionManager,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub countries: Arc<dyn CountryRepository>,
    pub vacations: Arc<dyn VacationRepository>,
    pub likes: Arc<dyn LikeRepository>,
    pub sessions: SessionManager,
}

impl AppState {
    /// Wire the PostgreSQL repositories over one pool
    pub fn with_pool(pool: PgPool, sessions: SessionManager) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            countries: Arc::new(PgCountryRepository::new(pool.clone())),
            vacations: Arc::new(PgVacationRepository::new(pool.clone())),
            likes: Arc::new(PgLikeRepository::new(pool)),
            sessions,
        }
    }
}
