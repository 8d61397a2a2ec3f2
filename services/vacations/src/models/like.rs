//! Like model and toggle outcome

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user's like of a vacation; at most one row exists per pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow)]
pub struct Like {
    pub user_id: i32,
    pub vacation_id: i32,
}

/// Result of toggling a like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeToggle {
    Liked,
    Unliked,
}

impl LikeToggle {
    pub fn is_liked(self) -> bool {
        matches!(self, LikeToggle::Liked)
    }

    /// Notice shown to HTML callers after the toggle
    pub fn notice(self) -> &'static str {
        match self {
            LikeToggle::Liked => "Vacation liked successfully",
            LikeToggle::Unliked => "Like removed",
        }
    }
}
