//! Country repository for database operations

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use super::CountryRepository;
use crate::models::Country;

/// PostgreSQL-backed country repository
#[derive(Clone)]
pub struct PgCountryRepository {
    pool: PgPool,
}

impl PgCountryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CountryRepository for PgCountryRepository {
    async fn list_all(&self) -> Result<Vec<Country>> {
        let countries =
            sqlx::query_as::<_, Country>("SELECT id, country_name FROM countries ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(countries)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Country>> {
        let country =
            sqlx::query_as::<_, Country>("SELECT id, country_name FROM countries WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(country)
    }

    async fn insert(&self, country_name: &str) -> Result<Country> {
        let country = sqlx::query_as::<_, Country>(
            "INSERT INTO countries (country_name) VALUES ($1) RETURNING id, country_name",
        )
        .bind(country_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(country)
    }

    async fn rename(&self, id: i32, country_name: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE countries SET country_name = $1 WHERE id = $2")
            .bind(country_name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        sqlx::query("DELETE FROM countries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
