//! Core data model definitions shared across userdesk crates.
#![allow(missing_docs)]

pub mod draft;
pub mod ids;
pub mod user;

// Intentionally curated re-exports for downstream consumers.
pub use draft::{FieldKey, ParseFieldKeyError, UserDraft};
pub use ids::{ParseUserIdError, UserId};
pub use user::{Address, Company, NewUser, User, derive_username};
