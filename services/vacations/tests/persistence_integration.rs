//! Repository tests against a live PostgreSQL database
//!
//! The tables are truncated before each test, so point `DATABASE_URL` at a
//! disposable database and run with `cargo test -- --ignored`.

use anyhow::Result;
use chrono::NaiveDate;
use common::database::{DatabaseConfig, init_pool, run_migrations};
use serial_test::serial;
use sqlx::PgPool;

use vacations::{
    MIGRATOR, accounts,
    models::{LikeToggle, NewUserRecord, NewVacation, Role, VacationField},
    repositories::{
        CountryRepository, LikeRepository, PgCountryRepository, PgLikeRepository,
        PgUserRepository, PgVacationRepository, UserRepository, VacationRepository,
    },
};

async fn fresh_pool() -> Result<PgPool> {
    let pool = init_pool(&DatabaseConfig::from_env()?).await?;
    run_migrations(&pool, &MIGRATOR).await?;
    sqlx::query("TRUNCATE likes, vacations, users RESTART IDENTITY")
        .execute(&pool)
        .await?;
    Ok(pool)
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).expect("valid date")
}

async fn seed(pool: &PgPool) -> Result<(i32, i32)> {
    let users = PgUserRepository::new(pool.clone());
    let user = users
        .insert(&NewUserRecord {
            first_name: "Noa".to_string(),
            last_name: "Cohen".to_string(),
            email: "noa@example.com".to_string(),
            password_hash: accounts::hash_password("s3cret")?,
            role: Role::Member,
        })
        .await?;

    let countries = PgCountryRepository::new(pool.clone());
    let country = countries.list_all().await?[0].clone();

    let vacation = PgVacationRepository::new(pool.clone())
        .insert(&NewVacation {
            country_id: country.id,
            vacation_description: "Amazing trip".to_string(),
            arrival: date(12, 20),
            departure: date(12, 25),
            price: 3400,
            file_name: None,
        })
        .await?;

    Ok((user.id, vacation.id))
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_lone_delete_leaves_likes() -> Result<()> {
    let pool = fresh_pool().await?;
    let (user_id, vacation_id) = seed(&pool).await?;
    let vacations = PgVacationRepository::new(pool.clone());
    let likes = PgLikeRepository::new(pool.clone());

    likes.insert(user_id, vacation_id).await?;
    vacations.delete(vacation_id).await?;

    assert!(vacations.find_by_id(vacation_id).await?.is_none());
    assert_eq!(likes.count_for_vacation(vacation_id).await?, 1);

    assert_eq!(likes.delete_for_vacation(vacation_id).await?, 1);
    assert_eq!(likes.count_for_vacation(vacation_id).await?, 0);
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_delete_with_likes_is_atomic() -> Result<()> {
    let pool = fresh_pool().await?;
    let (user_id, vacation_id) = seed(&pool).await?;
    let vacations = PgVacationRepository::new(pool.clone());
    let likes = PgLikeRepository::new(pool.clone());

    likes.insert(user_id, vacation_id).await?;
    assert!(vacations.delete_with_likes(vacation_id).await?);
    assert_eq!(likes.count_for_vacation(vacation_id).await?, 0);

    assert!(!vacations.delete_with_likes(vacation_id).await?);
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_toggle_and_duplicate_insert() -> Result<()> {
    let pool = fresh_pool().await?;
    let (user_id, vacation_id) = seed(&pool).await?;
    let likes = PgLikeRepository::new(pool.clone());

    assert_eq!(likes.toggle(user_id, vacation_id).await?, LikeToggle::Liked);
    likes.insert(user_id, vacation_id).await?;
    assert_eq!(likes.count_for_vacation(vacation_id).await?, 1);

    assert_eq!(likes.toggle(user_id, vacation_id).await?, LikeToggle::Unliked);
    assert!(likes.find(user_id, vacation_id).await?.is_none());
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_field_updates_and_lookups() -> Result<()> {
    let pool = fresh_pool().await?;
    let (_, vacation_id) = seed(&pool).await?;
    let vacations = PgVacationRepository::new(pool.clone());

    assert!(
        vacations
            .update_field(vacation_id, &VacationField::Price(4000))
            .await?
    );
    assert!(
        vacations
            .update_field(vacation_id, &VacationField::FileName(Some("isr.jpg".to_string())))
            .await?
    );
    assert!(!vacations.update_field(9999, &VacationField::Price(1)).await?);

    let updated = vacations
        .find_by_date_range(date(12, 20), date(12, 25))
        .await?
        .expect("found by dates");
    assert_eq!(updated.price, 4000);
    assert_eq!(updated.file_name.as_deref(), Some("isr.jpg"));

    let listings = vacations.list_with_country().await?;
    assert_eq!(listings.len(), 1);
    assert!(!listings[0].country_name.is_empty());
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_multi_field_update_is_one_write() -> Result<()> {
    let pool = fresh_pool().await?;
    let (_, vacation_id) = seed(&pool).await?;
    let vacations = PgVacationRepository::new(pool.clone());

    // Both dates move past the stored departure
    assert!(
        vacations
            .update_fields(
                vacation_id,
                &[
                    VacationField::Arrival(date(12, 27)),
                    VacationField::Departure(date(12, 30)),
                ],
            )
            .await?
    );

    let rejected = vacations
        .update_fields(
            vacation_id,
            &[
                VacationField::Description("Rewritten".to_string()),
                VacationField::Price(20_000),
            ],
        )
        .await;
    assert!(rejected.is_err());

    let stored = vacations.find_by_id(vacation_id).await?.expect("stored");
    assert_eq!(stored.arrival, date(12, 27));
    assert_eq!(stored.departure, date(12, 30));
    assert_eq!(stored.vacation_description, "Amazing trip");
    assert_eq!(stored.price, 3400);

    assert!(
        !vacations
            .update_fields(9999, &[VacationField::Price(1)])
            .await?
    );
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_concurrent_toggles_report_final_state() -> Result<()> {
    let pool = fresh_pool().await?;
    let (user_id, vacation_id) = seed(&pool).await?;
    let likes = PgLikeRepository::new(pool.clone());

    for _ in 0..50 {
        let (first, second) = tokio::join!(
            likes.toggle(user_id, vacation_id),
            likes.toggle(user_id, vacation_id)
        );
        let exists = likes.find(user_id, vacation_id).await?.is_some();
        let answers = [first?, second?];

        // Serialized toggles cancel out; racing inserts both end up liked
        assert_eq!(exists, answers == [LikeToggle::Liked, LikeToggle::Liked]);
        likes.delete(user_id, vacation_id).await?;
    }
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_listing_aggregates_likes_per_viewer() -> Result<()> {
    let pool = fresh_pool().await?;
    let (user_id, vacation_id) = seed(&pool).await?;
    let vacations = PgVacationRepository::new(pool.clone());
    let likes = PgLikeRepository::new(pool.clone());

    let empty = vacations.list_for_viewer(user_id).await?;
    assert_eq!(empty.len(), 1);
    assert_eq!(empty[0].likes_count, 0);
    assert!(!empty[0].user_liked);

    likes.insert(user_id, vacation_id).await?;
    let mine = vacations.list_for_viewer(user_id).await?;
    assert_eq!(mine[0].likes_count, 1);
    assert!(mine[0].user_liked);
    assert_eq!(mine[0].listing.vacation.id, vacation_id);

    let theirs = vacations.list_for_viewer(user_id + 1).await?;
    assert_eq!(theirs[0].likes_count, 1);
    assert!(!theirs[0].user_liked);
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_user_lookup_by_email() -> Result<()> {
    let pool = fresh_pool().await?;
    seed(&pool).await?;
    let users = PgUserRepository::new(pool.clone());

    assert!(users.email_exists("noa@example.com").await?);
    assert!(!users.email_exists("NOA@example.com").await?);

    let stored = users
        .find_by_email("noa@example.com")
        .await?
        .expect("stored");
    assert!(accounts::verify_password("s3cret", &stored.password_hash)?);
    assert_eq!(stored.role_id, Role::Member.id());
    Ok(())
}
