//! Repositories for database operations
//!
//! Each record kind is reached through an async trait so handlers can run
//! against PostgreSQL in production and against the in-memory store in tests.
//! Every method is a single statement (or, for `delete_with_likes`, a single
//! transaction) and commits immediately.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{
    Country, Like, LikeToggle, NewUserRecord, NewVacation, User, UserCredentials, Vacation,
    VacationField, VacationListing, VacationSummary,
};

pub mod country;
pub mod like;
#[cfg(test)]
pub mod memory;
pub mod user;
pub mod vacation;

pub use country::PgCountryRepository;
pub use like::PgLikeRepository;
pub use user::PgUserRepository;
pub use vacation::PgVacationRepository;

/// User accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users in insertion order
    async fn list_all(&self) -> Result<Vec<User>>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>>;

    /// Credentials for login; the match on email is exact and case-sensitive
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>>;

    async fn email_exists(&self, email: &str) -> Result<bool>;

    async fn insert(&self, user: &NewUserRecord) -> Result<User>;

    /// Idempotent; removing a missing user is not an error
    async fn delete(&self, id: i32) -> Result<()>;
}

/// Country reference data
#[async_trait]
pub trait CountryRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Country>>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Country>>;

    async fn insert(&self, country_name: &str) -> Result<Country>;

    /// Returns `false` when no country has this id
    async fn rename(&self, id: i32, country_name: &str) -> Result<bool>;

    async fn delete(&self, id: i32) -> Result<()>;
}

/// Vacation listings
#[async_trait]
pub trait VacationRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Vacation>>;

    /// Vacations inner-joined with their country name
    async fn list_with_country(&self) -> Result<Vec<VacationListing>>;

    /// Listings with their like count and whether `viewer_id` liked each one
    async fn list_for_viewer(&self, viewer_id: i32) -> Result<Vec<VacationSummary>>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Vacation>>;

    /// Vacation with exactly this arrival and departure, if any
    async fn find_by_date_range(
        &self,
        arrival: NaiveDate,
        departure: NaiveDate,
    ) -> Result<Option<Vacation>>;

    async fn insert(&self, vacation: &NewVacation) -> Result<Vacation>;

    /// Returns `false` when no vacation has this id
    async fn update_field(&self, id: i32, field: &VacationField) -> Result<bool> {
        self.update_fields(id, std::slice::from_ref(field)).await
    }

    /// Writes every field in one statement, so row constraints see the final
    /// values and a rejected write changes nothing.
    /// Returns `false` when no vacation has this id.
    async fn update_fields(&self, id: i32, fields: &[VacationField]) -> Result<bool>;

    /// Removes the vacation row only; its likes are left in place
    async fn delete(&self, id: i32) -> Result<()>;

    /// Removes the vacation and its likes in one transaction.
    /// Returns `false` when no vacation had this id.
    async fn delete_with_likes(&self, id: i32) -> Result<bool>;
}

/// Likes joining users to vacations
#[async_trait]
pub trait LikeRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Like>>;

    async fn find(&self, user_id: i32, vacation_id: i32) -> Result<Option<Like>>;

    /// Inserting an existing pair leaves the single row in place
    async fn insert(&self, user_id: i32, vacation_id: i32) -> Result<()>;

    async fn delete(&self, user_id: i32, vacation_id: i32) -> Result<()>;

    async fn count_for_vacation(&self, vacation_id: i32) -> Result<i64>;

    /// Atomically delete the pair if present, insert it otherwise
    async fn toggle(&self, user_id: i32, vacation_id: i32) -> Result<LikeToggle>;

    /// Returns the number of likes removed
    async fn delete_for_vacation(&self, vacation_id: i32) -> Result<u64>;
}
