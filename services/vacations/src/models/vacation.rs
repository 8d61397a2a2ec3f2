//! Vacation model, typed field updates and the listing projection

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use std::collections::{HashMap, HashSet};

use super::like::Like;

/// Vacation entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Vacation {
    pub id: i32,
    pub country_id: i32,
    pub vacation_description: String,
    pub arrival: NaiveDate,
    pub departure: NaiveDate,
    pub price: i32,
    pub file_name: Option<String>,
}

impl Vacation {
    /// Apply a single field update in place
    pub fn apply(&mut self, field: &VacationField) {
        match field {
            VacationField::CountryId(id) => self.country_id = *id,
            VacationField::Description(text) => self.vacation_description = text.clone(),
            VacationField::Arrival(date) => self.arrival = *date,
            VacationField::Departure(date) => self.departure = *date,
            VacationField::Price(price) => self.price = *price,
            VacationField::FileName(name) => self.file_name = name.clone(),
        }
    }
}

/// Vacation joined with its country name, used for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct VacationListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub vacation: Vacation,
    pub country_name: String,
}

/// Listing entry with like information from one user's point of view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct VacationSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub listing: VacationListing,
    pub likes_count: i64,
    pub user_liked: bool,
}

impl VacationSummary {
    /// Attach like counts and the viewer's own likes to each listing
    pub fn collect(listings: Vec<VacationListing>, likes: &[Like], viewer_id: i32) -> Vec<Self> {
        let mut counts: HashMap<i32, i64> = HashMap::new();
        let mut liked_by_viewer = HashSet::new();
        for like in likes {
            *counts.entry(like.vacation_id).or_default() += 1;
            if like.user_id == viewer_id {
                liked_by_viewer.insert(like.vacation_id);
            }
        }

        listings
            .into_iter()
            .map(|listing| {
                let id = listing.vacation.id;
                VacationSummary {
                    likes_count: counts.get(&id).copied().unwrap_or(0),
                    user_liked: liked_by_viewer.contains(&id),
                    listing,
                }
            })
            .collect()
    }
}

/// Vacation creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVacation {
    pub country_id: i32,
    pub vacation_description: String,
    pub arrival: NaiveDate,
    pub departure: NaiveDate,
    pub price: i32,
    #[serde(default)]
    pub file_name: Option<String>,
}

/// One updatable vacation column together with its new value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VacationField {
    CountryId(i32),
    Description(String),
    Arrival(NaiveDate),
    Departure(NaiveDate),
    Price(i32),
    FileName(Option<String>),
}

impl VacationField {
    /// Column written by this update
    pub fn column(&self) -> &'static str {
        match self {
            VacationField::CountryId(_) => "country_id",
            VacationField::Description(_) => "vacation_description",
            VacationField::Arrival(_) => "arrival",
            VacationField::Departure(_) => "departure",
            VacationField::Price(_) => "price",
            VacationField::FileName(_) => "file_name",
        }
    }
}

/// Partial update payload; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VacationPatch {
    pub country_id: Option<i32>,
    pub vacation_description: Option<String>,
    pub arrival: Option<NaiveDate>,
    pub departure: Option<NaiveDate>,
    pub price: Option<i32>,
    /// `Some(None)` for an explicit null, which clears the file name
    #[serde(default, deserialize_with = "present")]
    pub file_name: Option<Option<String>>,
}

/// Keep a present-but-null value apart from an absent one
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl VacationPatch {
    /// Split the patch into field updates, in column order
    pub fn into_fields(self) -> Vec<VacationField> {
        let mut fields = Vec::new();
        if let Some(id) = self.country_id {
            fields.push(VacationField::CountryId(id));
        }
        if let Some(text) = self.vacation_description {
            fields.push(VacationField::Description(text));
        }
        if let Some(date) = self.arrival {
            fields.push(VacationField::Arrival(date));
        }
        if let Some(date) = self.departure {
            fields.push(VacationField::Departure(date));
        }
        if let Some(price) = self.price {
            fields.push(VacationField::Price(price));
        }
        if let Some(name) = self.file_name {
            let name = name.filter(|value| !value.trim().is_empty());
            fields.push(VacationField::FileName(name));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_patch_keeps_only_present_fields() {
        let patch = VacationPatch {
            price: Some(4000),
            departure: Some(date(2025, 12, 30)),
            ..Default::default()
        };

        assert_eq!(
            patch.into_fields(),
            vec![
                VacationField::Departure(date(2025, 12, 30)),
                VacationField::Price(4000),
            ]
        );
    }

    #[test]
    fn test_apply_updates_single_column() {
        let mut vacation = Vacation {
            id: 1,
            country_id: 2,
            vacation_description: "Amazing trip".to_string(),
            arrival: date(2025, 12, 20),
            departure: date(2025, 12, 25),
            price: 3400,
            file_name: None,
        };

        vacation.apply(&VacationField::FileName(Some("isr.jpg".to_string())));
        vacation.apply(&VacationField::Price(10000));

        assert_eq!(vacation.file_name.as_deref(), Some("isr.jpg"));
        assert_eq!(vacation.price, 10000);
        assert_eq!(vacation.arrival, date(2025, 12, 20));
    }

    #[test]
    fn test_listing_serializes_flat() {
        let listing = VacationListing {
            vacation: Vacation {
                id: 7,
                country_id: 3,
                vacation_description: "Islands".to_string(),
                arrival: date(2025, 6, 1),
                departure: date(2025, 6, 8),
                price: 2100,
                file_name: None,
            },
            country_name: "Greece".to_string(),
        };

        let json = serde_json::to_value(&listing).expect("serializable");
        assert_eq!(json["id"], 7);
        assert_eq!(json["country_name"], "Greece");
        assert_eq!(json["arrival"], "2025-06-01");
    }

    #[test]
    fn test_summary_counts_likes_per_viewer() {
        let listing = |id: i32| VacationListing {
            vacation: Vacation {
                id,
                country_id: 1,
                vacation_description: format!("Trip {}", id),
                arrival: date(2025, 1, id as u32),
                departure: date(2025, 1, id as u32 + 1),
                price: 1000,
                file_name: None,
            },
            country_name: "Israel".to_string(),
        };
        let likes = [
            Like { user_id: 1, vacation_id: 10 },
            Like { user_id: 2, vacation_id: 10 },
            Like { user_id: 2, vacation_id: 11 },
        ];

        let summaries = VacationSummary::collect(vec![listing(10), listing(11), listing(12)], &likes, 1);

        let counts: Vec<(i64, bool)> = summaries
            .iter()
            .map(|s| (s.likes_count, s.user_liked))
            .collect();
        assert_eq!(counts, vec![(2, true), (1, false), (0, false)]);

        let json = serde_json::to_value(&summaries[0]).expect("serializable");
        assert_eq!(json["likes_count"], 2);
        assert_eq!(json["user_liked"], true);
        assert_eq!(json["country_name"], "Israel");
    }

    #[test]
    fn test_patch_file_name_can_be_cleared() {
        let from_null: VacationPatch =
            serde_json::from_str(r#"{"file_name": null}"#).expect("valid patch");
        assert_eq!(from_null.into_fields(), vec![VacationField::FileName(None)]);

        let from_blank: VacationPatch =
            serde_json::from_str(r#"{"file_name": "  "}"#).expect("valid patch");
        assert_eq!(from_blank.into_fields(), vec![VacationField::FileName(None)]);

        let absent: VacationPatch = serde_json::from_str(r#"{"price": 10}"#).expect("valid patch");
        assert_eq!(absent.into_fields(), vec![VacationField::Price(10)]);

        let named: VacationPatch =
            serde_json::from_str(r#"{"file_name": "isr.jpg"}"#).expect("valid patch");
        assert_eq!(
            named.into_fields(),
            vec![VacationField::FileName(Some("isr.jpg".to_string()))]
        );
    }
}
