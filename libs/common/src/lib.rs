//! Common library for the vacation listings workspace
//!
//! This crate provides the infrastructure shared by the services: PostgreSQL
//! connection pooling and migrations, the Redis connection used as the
//! server-side session backend, and the related error types.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, health_check, init_pool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_pool(&config).await?;
//!     assert!(health_check(&pool).await?);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod database;
pub mod error;
