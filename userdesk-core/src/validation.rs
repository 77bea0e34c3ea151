//! Field-level validation of user drafts.
//!
//! [`validate`] runs every rule against every field and reports all
//! violations in one pass. The patterns are simple shape checks, not full
//! RFC validation:
//!
//! | field            | rule                                                  |
//! |------------------|-------------------------------------------------------|
//! | `name`           | required, at least 3 characters                       |
//! | `email`          | required, `local@domain.tld` shape                    |
//! | `phone`          | required, optional `+`, then 2-15 digits not led by 0 |
//! | `address.street` | required                                              |
//! | `address.city`   | required                                              |
//! | `company.name`   | optional, at least 3 characters when present          |
//! | `website`        | optional, `http(s)://` URL shape when present         |
//!
//! "Required" means non-empty; values are not trimmed. Lengths count
//! characters, not bytes.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use userdesk_model::{FieldKey, UserDraft};

// Lengths count Unicode scalar values, so "👍👍" is two characters long.
pub const MIN_NAME_LEN: usize = 3;
pub const MIN_COMPANY_NAME_LEN: usize = 3;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

// E.164: ASCII digits only, so `[0-9]` rather than the Unicode-aware `\d`.
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[1-9][0-9]{1,14}$").expect("phone pattern compiles")
});

static WEBSITE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[^\s$.?#].[^\s]*$")
        .expect("website pattern compiles")
});

/// Field key to message map produced by [`validate`].
///
/// A key is present only for an invalid field; an empty result means the
/// draft may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    errors: BTreeMap<FieldKey, String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field carries an error.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.errors.get(&key).map(String::as_str)
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.errors.contains_key(&key)
    }

    /// Set or clear the error of a single field.
    pub fn set(&mut self, key: FieldKey, message: Option<String>) {
        match message {
            Some(message) => {
                self.errors.insert(key, message);
            }
            None => {
                self.errors.remove(&key);
            }
        }
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Errors in form order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.errors.iter().map(|(key, msg)| (*key, msg.as_str()))
    }
}

impl FromIterator<(FieldKey, String)> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = (FieldKey, String)>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

/// Validate every field of `draft`.
pub fn validate(draft: &UserDraft) -> ValidationResult {
    FieldKey::ALL
        .into_iter()
        .filter_map(|key| validate_field(draft, key).map(|msg| (key, msg)))
        .collect()
}

/// Validate a single field, returning its message if it is invalid.
pub fn validate_field(draft: &UserDraft, key: FieldKey) -> Option<String> {
    let value = draft.get(key);
    let message = match key {
        FieldKey::Name => {
            if value.is_empty() {
                Some("Name is required")
            } else if value.chars().count() < MIN_NAME_LEN {
                Some("Name must be at least 3 characters")
            } else {
                None
            }
        }
        FieldKey::Email => {
            if value.is_empty() {
                Some("Email is required")
            } else if !EMAIL_PATTERN.is_match(value) {
                Some("Email is not valid")
            } else {
                None
            }
        }
        FieldKey::Phone => {
            if value.is_empty() {
                Some("Phone is required")
            } else if !PHONE_PATTERN.is_match(value) {
                Some("Phone is not valid")
            } else {
                None
            }
        }
        FieldKey::AddressStreet => {
            value.is_empty().then_some("Street address is required")
        }
        FieldKey::AddressCity => value.is_empty().then_some("City is required"),
        FieldKey::CompanyName => {
            (!value.is_empty() && value.chars().count() < MIN_COMPANY_NAME_LEN)
                .then_some("Company name must be at least 3 characters")
        }
        FieldKey::Website => (!value.is_empty()
            && !WEBSITE_PATTERN.is_match(value))
        .then_some("Website must be a valid URL"),
    };
    message.map(str::to_string)
}
