//! Country reference data

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Country entity, seeded by migration and read when building vacations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Country {
    pub id: i32,
    pub country_name: String,
}
