//! In-memory store implementing every repository trait, for tests

use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Mutex, MutexGuard};

use super::{CountryRepository, LikeRepository, UserRepository, VacationRepository};
use crate::models::{
    Country, Like, LikeToggle, NewUserRecord, NewVacation, User, UserCredentials, Vacation,
    VacationField, VacationListing, VacationSummary,
};

#[derive(Default)]
struct Tables {
    next_id: i32,
    users: Vec<UserCredentials>,
    countries: Vec<Country>,
    vacations: Vec<Vacation>,
    likes: Vec<Like>,
}

impl Tables {
    fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Shared tables guarded by a mutex; no lock is held across an await
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn list_all(&self) -> Result<Vec<User>> {
        Ok(self.lock().users.iter().map(UserCredentials::to_user).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|user| user.id == id)
            .map(UserCredentials::to_user))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>> {
        Ok(self.lock().users.iter().find(|user| user.email == email).cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        Ok(self.lock().users.iter().any(|user| user.email == email))
    }

    async fn insert(&self, user: &NewUserRecord) -> Result<User> {
        let mut tables = self.lock();
        if tables.users.iter().any(|existing| existing.email == user.email) {
            bail!("duplicate key value violates unique constraint \"users_email_key\"");
        }
        let id = tables.allocate_id();
        let stored = UserCredentials {
            id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            role_id: user.role.id(),
        };
        let created = stored.to_user();
        tables.users.push(stored);
        Ok(created)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let mut tables = self.lock();
        tables.users.retain(|user| user.id != id);
        tables.likes.retain(|like| like.user_id != id);
        Ok(())
    }
}

#[async_trait]
impl CountryRepository for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Country>> {
        Ok(self.lock().countries.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Country>> {
        Ok(self.lock().countries.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, country_name: &str) -> Result<Country> {
        let mut tables = self.lock();
        let country = Country {
            id: tables.allocate_id(),
            country_name: country_name.to_string(),
        };
        tables.countries.push(country.clone());
        Ok(country)
    }

    async fn rename(&self, id: i32, country_name: &str) -> Result<bool> {
        let mut tables = self.lock();
        match tables.countries.iter_mut().find(|c| c.id == id) {
            Some(country) => {
                country.country_name = country_name.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i32) -> Result<()> {
        self.lock().countries.retain(|c| c.id != id);
        Ok(())
    }
}

#[async_trait]
impl VacationRepository for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Vacation>> {
        Ok(self.lock().vacations.clone())
    }

    async fn list_with_country(&self) -> Result<Vec<VacationListing>> {
        let tables = self.lock();
        let listings = tables
            .vacations
            .iter()
            .filter_map(|vacation| {
                tables
                    .countries
                    .iter()
                    .find(|c| c.id == vacation.country_id)
                    .map(|country| VacationListing {
                        vacation: vacation.clone(),
                        country_name: country.country_name.clone(),
                    })
            })
            .collect();
        Ok(listings)
    }

    async fn list_for_viewer(&self, viewer_id: i32) -> Result<Vec<VacationSummary>> {
        let listings = self.list_with_country().await?;
        let likes = self.lock().likes.clone();
        Ok(VacationSummary::collect(listings, &likes, viewer_id))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Vacation>> {
        Ok(self.lock().vacations.iter().find(|v| v.id == id).cloned())
    }

    async fn find_by_date_range(
        &self,
        arrival: NaiveDate,
        departure: NaiveDate,
    ) -> Result<Option<Vacation>> {
        Ok(self
            .lock()
            .vacations
            .iter()
            .find(|v| v.arrival == arrival && v.departure == departure)
            .cloned())
    }

    async fn insert(&self, vacation: &NewVacation) -> Result<Vacation> {
        let mut tables = self.lock();
        let created = Vacation {
            id: tables.allocate_id(),
            country_id: vacation.country_id,
            vacation_description: vacation.vacation_description.clone(),
            arrival: vacation.arrival,
            departure: vacation.departure,
            price: vacation.price,
            file_name: vacation.file_name.clone(),
        };
        tables.vacations.push(created.clone());
        Ok(created)
    }

    async fn update_fields(&self, id: i32, fields: &[VacationField]) -> Result<bool> {
        let mut tables = self.lock();
        let Some(vacation) = tables.vacations.iter_mut().find(|v| v.id == id) else {
            return Ok(false);
        };

        // Same row checks as the schema, on the final values
        let mut updated = vacation.clone();
        for field in fields {
            updated.apply(field);
        }
        if updated.arrival > updated.departure {
            bail!("vacations_dates_ordered violated for vacation {id}");
        }
        if !(0..=10_000).contains(&updated.price) {
            bail!("vacations_price_range violated for vacation {id}");
        }

        *vacation = updated;
        Ok(true)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        self.lock().vacations.retain(|v| v.id != id);
        Ok(())
    }

    async fn delete_with_likes(&self, id: i32) -> Result<bool> {
        let mut tables = self.lock();
        let before = tables.vacations.len();
        tables.likes.retain(|like| like.vacation_id != id);
        tables.vacations.retain(|v| v.id != id);
        Ok(tables.vacations.len() < before)
    }
}

#[async_trait]
impl LikeRepository for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Like>> {
        Ok(self.lock().likes.clone())
    }

    async fn find(&self, user_id: i32, vacation_id: i32) -> Result<Option<Like>> {
        let wanted = Like {
            user_id,
            vacation_id,
        };
        Ok(self.lock().likes.iter().find(|like| **like == wanted).copied())
    }

    async fn insert(&self, user_id: i32, vacation_id: i32) -> Result<()> {
        let like = Like {
            user_id,
            vacation_id,
        };
        let mut tables = self.lock();
        if !tables.likes.contains(&like) {
            tables.likes.push(like);
        }
        Ok(())
    }

    async fn delete(&self, user_id: i32, vacation_id: i32) -> Result<()> {
        let like = Like {
            user_id,
            vacation_id,
        };
        self.lock().likes.retain(|existing| *existing != like);
        Ok(())
    }

    async fn count_for_vacation(&self, vacation_id: i32) -> Result<i64> {
        let count = self
            .lock()
            .likes
            .iter()
            .filter(|like| like.vacation_id == vacation_id)
            .count();
        Ok(i64::try_from(count)?)
    }

    async fn toggle(&self, user_id: i32, vacation_id: i32) -> Result<LikeToggle> {
        let like = Like {
            user_id,
            vacation_id,
        };
        let mut tables = self.lock();
        if let Some(position) = tables.likes.iter().position(|existing| *existing == like) {
            tables.likes.remove(position);
            Ok(LikeToggle::Unliked)
        } else {
            tables.likes.push(like);
            Ok(LikeToggle::Liked)
        }
    }

    async fn delete_for_vacation(&self, vacation_id: i32) -> Result<u64> {
        let mut tables = self.lock();
        let before = tables.likes.len();
        tables.likes.retain(|like| like.vacation_id != vacation_id);
        Ok(u64::try_from(before - tables.likes.len())?)
    }
}
