//! User model and related functionality

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Account role, stored as `users.role_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Role {
    /// Ordinary member
    Member = 1,
    /// Elevated role allowed to manage vacations
    Admin = 2,
}

impl Role {
    pub fn id(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for Role {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Role::Member),
            2 => Ok(Role::Admin),
            other => Err(format!("unknown role id {}", other)),
        }
    }
}

impl From<Role> for i32 {
    fn from(role: Role) -> Self {
        role.id()
    }
}

/// User entity as exposed to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role_id: i32,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Stored credentials looked up by email at login
#[derive(Clone, FromRow)]
pub struct UserCredentials {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[sqlx(rename = "password")]
    pub password_hash: String,
    pub role_id: i32,
}

impl UserCredentials {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Public view without the password hash
    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            role_id: self.role_id,
        }
    }
}

impl fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredentials")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("role_id", &self.role_id)
            .finish_non_exhaustive()
    }
}

/// Registration candidate; `password` is the plaintext supplied by the caller
#[derive(Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Validated user ready for insertion, carrying the password hash
#[derive(Clone)]
pub struct NewUserRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// User login credentials
#[derive(Clone, Default, Deserialize)]
pub struct LoginCredentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}
