//! Editable working copy of a user record.
//!
//! A draft holds one flat slot per editable field. The nested `address` and
//! `company` shapes of [`User`] are only reassembled when the draft is turned
//! into a request body.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::user::{Address, Company, NewUser, User, derive_username};

/// Editable fields of a user record, in form order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum FieldKey {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "phone")]
    Phone,
    #[serde(rename = "address.street")]
    AddressStreet,
    #[serde(rename = "address.city")]
    AddressCity,
    #[serde(rename = "company.name")]
    CompanyName,
    #[serde(rename = "website")]
    Website,
}

impl FieldKey {
    pub const ALL: [FieldKey; 7] = [
        FieldKey::Name,
        FieldKey::Email,
        FieldKey::Phone,
        FieldKey::AddressStreet,
        FieldKey::AddressCity,
        FieldKey::CompanyName,
        FieldKey::Website,
    ];

    /// Stable key used in error maps and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Email => "email",
            FieldKey::Phone => "phone",
            FieldKey::AddressStreet => "address.street",
            FieldKey::AddressCity => "address.city",
            FieldKey::CompanyName => "company.name",
            FieldKey::Website => "website",
        }
    }

    /// Human-facing label for prompts.
    pub fn label(self) -> &'static str {
        match self {
            FieldKey::Name => "Name",
            FieldKey::Email => "Email",
            FieldKey::Phone => "Phone",
            FieldKey::AddressStreet => "Address (Street)",
            FieldKey::AddressCity => "Address (City)",
            FieldKey::CompanyName => "Company Name (Optional)",
            FieldKey::Website => "Website (Optional)",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, FieldKey::CompanyName | FieldKey::Website)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFieldKeyError(pub String);

impl fmt::Display for ParseFieldKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field '{}'", self.0)
    }
}

impl std::error::Error for ParseFieldKeyError {}

impl FromStr for FieldKey {
    type Err = ParseFieldKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ParseFieldKeyError(s.to_string()))
    }
}

/// Flat, mutable working copy of a user record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address_street: String,
    pub address_city: String,
    pub company_name: String,
    pub website: String,
}

impl UserDraft {
    /// Copy every editable field out of an existing record.
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            address_street: user.address.street.clone(),
            address_city: user.address.city.clone(),
            company_name: user.company.name.clone(),
            website: user.website.clone(),
        }
    }

    pub fn get(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Name => &self.name,
            FieldKey::Email => &self.email,
            FieldKey::Phone => &self.phone,
            FieldKey::AddressStreet => &self.address_street,
            FieldKey::AddressCity => &self.address_city,
            FieldKey::CompanyName => &self.company_name,
            FieldKey::Website => &self.website,
        }
    }

    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) {
        let slot = match key {
            FieldKey::Name => &mut self.name,
            FieldKey::Email => &mut self.email,
            FieldKey::Phone => &mut self.phone,
            FieldKey::AddressStreet => &mut self.address_street,
            FieldKey::AddressCity => &mut self.address_city,
            FieldKey::CompanyName => &mut self.company_name,
            FieldKey::Website => &mut self.website,
        };
        *slot = value.into();
    }

    fn address(&self) -> Address {
        Address {
            street: self.address_street.clone(),
            city: self.address_city.clone(),
        }
    }

    fn company(&self) -> Company {
        Company {
            name: self.company_name.clone(),
        }
    }

    /// Assemble a create payload, deriving the username from the name.
    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address(),
            company: self.company(),
            website: self.website.clone(),
            username: derive_username(&self.name),
        }
    }

    /// Assemble a full replacement for `source`.
    ///
    /// `id` and `username` are carried over untouched; they are never edited.
    pub fn to_user(&self, source: &User) -> User {
        User {
            id: source.id,
            name: self.name.clone(),
            username: source.username.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address(),
            company: self.company(),
            website: self.website.clone(),
        }
    }
}
