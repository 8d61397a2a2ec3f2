//! Vacation listings service
//!
//! Members browse vacations and like them; administrators manage the
//! listings. Every route answers JSON or, for browser callers, a redirect with
//! a flash notice.

use sqlx::migrate::Migrator;

pub mod accounts;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod negotiation;
pub mod payload;
pub mod render;
pub mod repositories;
pub mod routes;
pub mod session;
pub mod state;
pub mod validation;

/// Schema migrations embedded at compile time
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");
