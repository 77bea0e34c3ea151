//! # userdesk core
//!
//! Client-side rules shared by every userdesk front-end:
//!
//! - [`validation`]: the field-level validation engine run before any write
//!   reaches the remote service
//! - [`api`]: route table of the remote user service
//! - [`error`]: the transport error every remote call is normalized into
//!
//! Nothing in this crate performs I/O.
//!
//! ```
//! use userdesk_core::validation::validate;
//! use userdesk_model::{FieldKey, UserDraft};
//!
//! let mut draft = UserDraft::default();
//! draft.set(FieldKey::Name, "Al");
//! let result = validate(&draft);
//! assert_eq!(
//!     result.get(FieldKey::Name),
//!     Some("Name must be at least 3 characters")
//! );
//! ```

pub mod api;
pub mod error;
pub mod validation;

pub use error::TransportError;
pub use validation::{ValidationResult, validate, validate_field};
