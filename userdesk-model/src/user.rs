use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// Prefix applied to usernames derived on creation.
pub const USERNAME_PREFIX: &str = "USER-";

/// A user record as exchanged with the remote service.
///
/// Fields the service returns but the console does not manage (`geo`,
/// `catchPhrase`, ...) are dropped on deserialization. Missing string fields
/// default to empty so partially populated records still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub company: Company,
    #[serde(default)]
    pub website: String,
}

impl User {
    /// Case-insensitive substring match on `name`.
    ///
    /// `needle_lower` must already be lowercased; callers filtering a whole
    /// collection lowercase the term once.
    pub fn name_contains(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || self.name.to_lowercase().contains(needle_lower)
    }

    /// Whether this record carries the given service id.
    pub fn has_id(&self, id: UserId) -> bool {
        self.id == Some(id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub name: String,
}

/// Create payload: a record without an id, plus the derived username.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub company: Company,
    pub website: String,
    pub username: String,
}

impl NewUser {
    /// Attach a service-assigned id, producing the stored record shape.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id: Some(id),
            name: self.name,
            username: self.username,
            email: self.email,
            phone: self.phone,
            address: self.address,
            company: self.company,
            website: self.website,
        }
    }
}

/// `"USER-"` followed by the name's first space-separated token.
pub fn derive_username(name: &str) -> String {
    let first = name.split(' ').next().unwrap_or_default();
    format!("{USERNAME_PREFIX}{first}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_uses_first_token() {
        assert_eq!(derive_username("Ann Lee"), "USER-Ann");
        assert_eq!(derive_username("Prince"), "USER-Prince");
        // Leading space yields an empty first token, as a plain split does.
        assert_eq!(derive_username(" Ann"), "USER-");
    }

    #[test]
    fn decodes_service_payload_and_ignores_extra_fields() {
        let json = r#"{
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {
                "street": "Kulas Light",
                "suite": "Apt. 556",
                "city": "Gwenborough",
                "zipcode": "92998-3874",
                "geo": { "lat": "-37.3159", "lng": "81.1496" }
            },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": { "name": "Romaguera-Crona", "catchPhrase": "x", "bs": "y" }
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, Some(UserId(1)));
        assert_eq!(user.address.city, "Gwenborough");
        assert_eq!(user.company.name, "Romaguera-Crona");
    }

    #[test]
    fn missing_optional_sections_default_to_empty() {
        let user: User =
            serde_json::from_str(r#"{"id": 3, "name": "Ann"}"#).unwrap();
        assert_eq!(user.company, Company::default());
        assert!(user.website.is_empty());
    }

    #[test]
    fn id_is_omitted_when_absent() {
        let user = User {
            name: "Ann".into(),
            ..User::default()
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("id").is_none());
    }

    #[test]
    fn name_match_is_case_insensitive() {
        let user = User {
            name: "ALICIA".into(),
            ..User::default()
        };
        assert!(user.name_contains("ali"));
        assert!(user.name_contains(""));
        assert!(!user.name_contains("bob"));
    }
}
