//! Like repository for database operations

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use super::LikeRepository;
use crate::models::{Like, LikeToggle};

/// Deletes the pair when present and inserts it otherwise, in one statement.
/// The primary key on (user_id, vacation_id) turns a concurrent duplicate
/// insert into a no-op; the pair then exists, so the answer is still liked.
const TOGGLE_LIKE: &str = r#"
    WITH removed AS (
        DELETE FROM likes
        WHERE user_id = $1 AND vacation_id = $2
        RETURNING user_id
    ),
    added AS (
        INSERT INTO likes (user_id, vacation_id)
        SELECT $1, $2
        WHERE NOT EXISTS (SELECT 1 FROM removed)
        ON CONFLICT (user_id, vacation_id) DO NOTHING
        RETURNING user_id
    )
    SELECT EXISTS (SELECT 1 FROM added) OR NOT EXISTS (SELECT 1 FROM removed) AS liked
"#;

/// PostgreSQL-backed like repository
#[derive(Clone)]
pub struct PgLikeRepository {
    pool: PgPool,
}

impl PgLikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepository for PgLikeRepository {
    async fn list_all(&self) -> Result<Vec<Like>> {
        let likes = sqlx::query_as::<_, Like>(
            "SELECT user_id, vacation_id FROM likes ORDER BY vacation_id, user_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(likes)
    }

    async fn find(&self, user_id: i32, vacation_id: i32) -> Result<Option<Like>> {
        let like = sqlx::query_as::<_, Like>(
            "SELECT user_id, vacation_id FROM likes WHERE user_id = $1 AND vacation_id = $2",
        )
        .bind(user_id)
        .bind(vacation_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(like)
    }

    async fn insert(&self, user_id: i32, vacation_id: i32) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO likes (user_id, vacation_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, vacation_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(vacation_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, user_id: i32, vacation_id: i32) -> Result<()> {
        sqlx::query("DELETE FROM likes WHERE user_id = $1 AND vacation_id = $2")
            .bind(user_id)
            .bind(vacation_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count_for_vacation(&self, vacation_id: i32) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE vacation_id = $1")
            .bind(vacation_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn toggle(&self, user_id: i32, vacation_id: i32) -> Result<LikeToggle> {
        let liked: bool = sqlx::query_scalar(TOGGLE_LIKE)
            .bind(user_id)
            .bind(vacation_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(if liked {
            LikeToggle::Liked
        } else {
            LikeToggle::Unliked
        })
    }

    async fn delete_for_vacation(&self, vacation_id: i32) -> Result<u64> {
        let result = sqlx::query("DELETE FROM likes WHERE vacation_id = $1")
            .bind(vacation_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
