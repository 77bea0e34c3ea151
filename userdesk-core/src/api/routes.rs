/// Routes of the remote user service, relative to its base URL.
pub mod users {
    pub const COLLECTION: &str = "/users";
    pub const ITEM: &str = "/users/{id}";
}

pub mod utils {
    /// Replace a single path parameter (e.g. `"{id}"`) with the provided value.
    pub fn replace_param(
        route: &str,
        param: &str,
        value: impl AsRef<str>,
    ) -> String {
        route.replace(param, value.as_ref())
    }

    /// Path of a single user record.
    pub fn user_item(id: impl std::fmt::Display) -> String {
        replace_param(super::users::ITEM, "{id}", id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use userdesk_model::UserId;

    #[test]
    fn item_route_substitutes_id() {
        assert_eq!(utils::user_item(UserId(11)), "/users/11");
        assert_eq!(
            utils::replace_param(users::ITEM, "{id}", "abc"),
            "/users/abc"
        );
    }
}
