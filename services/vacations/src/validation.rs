//! Business-rule validation run before any mutation
//!
//! The checks are pure except where uniqueness or existence has to be
//! confirmed against the store. Check order is observable: callers see the
//! first rule that fails.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use crate::{
    error::{ApiResult, ValidationError},
    models::{LoginCredentials, NewUser, NewVacation, Role, Vacation, VacationField},
    repositories::{CountryRepository, UserRepository, VacationRepository},
};

pub const MIN_PASSWORD_LENGTH: usize = 4;
pub const MIN_PRICE: i32 = 0;
pub const MAX_PRICE: i32 = 10_000;

/// Validate email shape: alphanumeric local part, alphabetic domain, 2+ letter TLD
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9]+@[A-Za-z]+\.[A-Za-z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err(ValidationError::InvalidFormat);
    }

    Ok(())
}

/// Validate password length, counted in characters
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::WeakCredential);
    }

    Ok(())
}

pub fn validate_price(price: i32) -> Result<(), ValidationError> {
    if !(MIN_PRICE..=MAX_PRICE).contains(&price) {
        return Err(ValidationError::OutOfRange);
    }

    Ok(())
}

/// Arrival may equal departure but never follow it
pub fn validate_date_order(arrival: NaiveDate, departure: NaiveDate) -> Result<(), ValidationError> {
    if arrival > departure {
        return Err(ValidationError::DateOrder);
    }

    Ok(())
}

/// Required signup fields, checked before the business rules
pub fn validate_signup_fields(candidate: &NewUser) -> Result<(), ValidationError> {
    let required = [
        ("First name", &candidate.first_name),
        ("Last name", &candidate.last_name),
        ("Email", &candidate.email),
        ("Password", &candidate.password),
    ];

    for (label, value) in required {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(label));
        }
    }

    Ok(())
}

/// Email format, password length and email uniqueness, in that order
pub async fn validate_account_fields(
    users: &dyn UserRepository,
    email: &str,
    password: &str,
) -> ApiResult<()> {
    validate_email(email)?;
    validate_password(password)?;

    if users.email_exists(email).await? {
        return Err(ValidationError::DuplicateEmail.into());
    }

    Ok(())
}

/// Validate a self-registration candidate
///
/// The elevated role is rejected before any other rule is looked at.
pub async fn validate_new_user(users: &dyn UserRepository, candidate: &NewUser) -> ApiResult<()> {
    if candidate.role == Role::Admin {
        return Err(ValidationError::InvalidRole.into());
    }

    validate_account_fields(users, &candidate.email, &candidate.password).await
}

/// Shape-only pre-check of login input; the password hash is verified later
pub fn validate_login(credentials: &LoginCredentials) -> Result<(), ValidationError> {
    if credentials.email.is_empty() {
        return Err(ValidationError::MissingField("Email"));
    }
    if credentials.password.is_empty() {
        return Err(ValidationError::MissingField("Password"));
    }

    validate_email(&credentials.email)?;
    validate_password(&credentials.password)
}

/// Validate a vacation before insertion
pub async fn validate_new_vacation(
    vacations: &dyn VacationRepository,
    candidate: &NewVacation,
) -> ApiResult<()> {
    if candidate.vacation_description.trim().is_empty() {
        return Err(ValidationError::MissingField("Vacation description").into());
    }

    validate_price(candidate.price)?;
    validate_date_order(candidate.arrival, candidate.departure)?;

    if vacations
        .find_by_date_range(candidate.arrival, candidate.departure)
        .await?
        .is_some()
    {
        return Err(ValidationError::DuplicateDateRange.into());
    }

    Ok(())
}

/// Validate one field update against the current state of the vacation
pub fn validate_vacation_field_update(
    existing: &Vacation,
    field: &VacationField,
) -> Result<(), ValidationError> {
    match field {
        VacationField::Price(price) => validate_price(*price),
        VacationField::Arrival(arrival) => validate_date_order(*arrival, existing.departure),
        VacationField::Departure(departure) => validate_date_order(existing.arrival, *departure),
        VacationField::Description(text) if text.trim().is_empty() => {
            Err(ValidationError::MissingField("Vacation description"))
        }
        VacationField::Description(_) | VacationField::CountryId(_) | VacationField::FileName(_) => {
            Ok(())
        }
    }
}

/// Validate a set of field updates applied together. Each field is checked
/// against the record with every update applied, so arrival and departure can
/// move in the same request. Returns the projected record.
pub fn validate_vacation_update(
    existing: &Vacation,
    fields: &[VacationField],
) -> Result<Vacation, ValidationError> {
    let mut projected = existing.clone();
    for field in fields {
        projected.apply(field);
    }

    for field in fields {
        validate_vacation_field_update(&projected, field)?;
    }

    Ok(projected)
}

pub async fn ensure_country_exists(countries: &dyn CountryRepository, id: i32) -> ApiResult<()> {
    if countries.find_by_id(id).await?.is_none() {
        return Err(ValidationError::UnknownCountry(id).into());
    }

    Ok(())
}
