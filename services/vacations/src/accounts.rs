//! Account registration and credential checks

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult},
    models::{LoginCredentials, NewUser, NewUserRecord, Role, User, UserCredentials},
    repositories::UserRepository,
    validation::{
        validate_account_fields, validate_login, validate_new_user, validate_signup_fields,
    },
};

/// Hash a plaintext password into a PHC string with a fresh salt
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();

    Ok(hash)
}

/// Check a plaintext password against a stored PHC string
pub fn verify_password(password: &str, password_hash: &str) -> anyhow::Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

fn into_record(candidate: NewUser, password_hash: String) -> NewUserRecord {
    NewUserRecord {
        first_name: candidate.first_name,
        last_name: candidate.last_name,
        email: candidate.email,
        password_hash,
        role: candidate.role,
    }
}

/// Register a user through self-signup
///
/// A request for the elevated role is rejected; anything else is stored as a
/// member.
pub async fn register(users: &dyn UserRepository, candidate: NewUser) -> ApiResult<User> {
    validate_signup_fields(&candidate)?;
    validate_new_user(users, &candidate).await?;

    let password_hash = hash_password(&candidate.password)?;
    let mut record = into_record(candidate, password_hash);
    record.role = Role::Member;
    let user = users.insert(&record).await?;

    info!("Registered user {}", user.id);
    Ok(user)
}

/// Create an elevated account; only reachable from internal tooling
pub async fn create_admin(users: &dyn UserRepository, mut candidate: NewUser) -> ApiResult<User> {
    candidate.role = Role::Admin;
    validate_account_fields(users, &candidate.email, &candidate.password).await?;

    let password_hash = hash_password(&candidate.password)?;
    let user = users.insert(&into_record(candidate, password_hash)).await?;

    info!("Created administrator {}", user.id);
    Ok(user)
}

/// Resolve login input to stored credentials
///
/// Fails with `NotFound` for an unknown email and `BadCredential` when the
/// password does not match the stored hash.
pub async fn authenticate(
    users: &dyn UserRepository,
    credentials: &LoginCredentials,
) -> ApiResult<UserCredentials> {
    validate_login(credentials)?;

    let stored = users
        .find_by_email(&credentials.email)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    if !verify_password(&credentials.password, &stored.password_hash)? {
        warn!("Rejected login for user {}", stored.id);
        return Err(ApiError::BadCredential);
    }

    info!("User {} logged in", stored.id);
    Ok(stored)
}
