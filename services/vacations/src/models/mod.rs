//! Vacation service models

pub mod country;
pub mod like;
pub mod user;
pub mod vacation;

// Re-export for convenience
pub use country::Country;
pub use like::{Like, LikeToggle};
pub use user::{LoginCredentials, NewUser, NewUserRecord, Role, User, UserCredentials};
pub use vacation::{
    NewVacation, Vacation, VacationField, VacationListing, VacationPatch, VacationSummary,
};
