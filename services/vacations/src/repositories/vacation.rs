//! Vacation repository for database operations

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;

use super::VacationRepository;
use crate::models::{NewVacation, Vacation, VacationField, VacationListing, VacationSummary};

/// PostgreSQL-backed vacation repository
#[derive(Clone)]
pub struct PgVacationRepository {
    pool: PgPool,
}

impl PgVacationRepository {
    /// Create a new vacation repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VacationRepository for PgVacationRepository {
    async fn list_all(&self) -> Result<Vec<Vacation>> {
        let vacations = sqlx::query_as::<_, Vacation>(
            r#"
            SELECT id, country_id, vacation_description, arrival, departure, price, file_name
            FROM vacations
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vacations)
    }

    async fn list_with_country(&self) -> Result<Vec<VacationListing>> {
        let listings = sqlx::query_as::<_, VacationListing>(
            r#"
            SELECT v.id, v.country_id, v.vacation_description, v.arrival, v.departure,
                   v.price, v.file_name, c.country_name
            FROM vacations v
            JOIN countries c ON v.country_id = c.id
            ORDER BY v.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(listings)
    }

    async fn list_for_viewer(&self, viewer_id: i32) -> Result<Vec<VacationSummary>> {
        let summaries = sqlx::query_as::<_, VacationSummary>(
            r#"
            SELECT v.id, v.country_id, v.vacation_description, v.arrival, v.departure,
                   v.price, v.file_name, c.country_name,
                   COUNT(l.user_id) AS likes_count,
                   COALESCE(BOOL_OR(l.user_id = $1), false) AS user_liked
            FROM vacations v
            JOIN countries c ON v.country_id = c.id
            LEFT JOIN likes l ON l.vacation_id = v.id
            GROUP BY v.id, c.country_name
            ORDER BY v.id
            "#,
        )
        .bind(viewer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Vacation>> {
        let vacation = sqlx::query_as::<_, Vacation>(
            r#"
            SELECT id, country_id, vacation_description, arrival, departure, price, file_name
            FROM vacations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vacation)
    }

    async fn find_by_date_range(
        &self,
        arrival: NaiveDate,
        departure: NaiveDate,
    ) -> Result<Option<Vacation>> {
        let vacation = sqlx::query_as::<_, Vacation>(
            r#"
            SELECT id, country_id, vacation_description, arrival, departure, price, file_name
            FROM vacations
            WHERE arrival = $1 AND departure = $2
            LIMIT 1
            "#,
        )
        .bind(arrival)
        .bind(departure)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vacation)
    }

    async fn insert(&self, vacation: &NewVacation) -> Result<Vacation> {
        info!(
            "Creating vacation {} -> {} in country {}",
            vacation.arrival, vacation.departure, vacation.country_id
        );

        let created = sqlx::query_as::<_, Vacation>(
            r#"
            INSERT INTO vacations
                (country_id, vacation_description, arrival, departure, price, file_name)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, country_id, vacation_description, arrival, departure, price, file_name
            "#,
        )
        .bind(vacation.country_id)
        .bind(&vacation.vacation_description)
        .bind(vacation.arrival)
        .bind(vacation.departure)
        .bind(vacation.price)
        .bind(vacation.file_name.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_fields(&self, id: i32, fields: &[VacationField]) -> Result<bool> {
        if fields.is_empty() {
            return Ok(self.find_by_id(id).await?.is_some());
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE vacations SET ");
        let mut columns = builder.separated(", ");
        for field in fields {
            // column() only yields fixed column names
            columns.push(format!("{} = ", field.column()));
            match field {
                VacationField::CountryId(value) | VacationField::Price(value) => {
                    columns.push_bind_unseparated(*value);
                }
                VacationField::Description(text) => {
                    columns.push_bind_unseparated(text.clone());
                }
                VacationField::Arrival(date) | VacationField::Departure(date) => {
                    columns.push_bind_unseparated(*date);
                }
                VacationField::FileName(name) => {
                    columns.push_bind_unseparated(name.clone());
                }
            }
        }
        builder.push(" WHERE id = ").push_bind(id);

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        sqlx::query("DELETE FROM vacations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_with_likes(&self, id: i32) -> Result<bool> {
        info!("Deleting vacation {} and its likes", id);

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM likes WHERE vacation_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM vacations WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
