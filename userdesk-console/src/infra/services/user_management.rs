use std::sync::Arc;

use async_trait::async_trait;
use userdesk_core::TransportError;
use userdesk_core::api::routes::{users, utils};
use userdesk_model::{NewUser, User, UserId};

use crate::infra::api_client::ApiClient;

/// Remote CRUD operations on user records.
///
/// Implementations hold no state beyond their connection; every method is a
/// single call whose failure is reported as a [`TransportError`].
#[async_trait]
pub trait UserAdminService: Send + Sync {
    /// Full collection, in service order
    async fn list_users(&self) -> Result<Vec<User>, TransportError>;

    /// A single record. A missing id is just another transport failure.
    async fn get_user(&self, user_id: UserId) -> Result<User, TransportError>;

    /// Create a record; the returned representation carries the assigned id
    async fn create_user(&self, user: NewUser) -> Result<User, TransportError>;

    /// Replace a record wholesale
    async fn update_user(
        &self,
        user_id: UserId,
        user: User,
    ) -> Result<User, TransportError>;

    async fn delete_user(&self, user_id: UserId) -> Result<(), TransportError>;
}

#[derive(Clone, Debug)]
pub struct UserAdminApiAdapter {
    client: Arc<ApiClient>,
}

impl UserAdminApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserAdminService for UserAdminApiAdapter {
    async fn list_users(&self) -> Result<Vec<User>, TransportError> {
        self.client.get(users::COLLECTION).await
    }

    async fn get_user(&self, user_id: UserId) -> Result<User, TransportError> {
        self.client.get(&utils::user_item(user_id)).await
    }

    async fn create_user(&self, user: NewUser) -> Result<User, TransportError> {
        self.client.post(users::COLLECTION, &user).await
    }

    async fn update_user(
        &self,
        user_id: UserId,
        user: User,
    ) -> Result<User, TransportError> {
        self.client.put(&utils::user_item(user_id), &user).await
    }

    async fn delete_user(&self, user_id: UserId) -> Result<(), TransportError> {
        self.client.delete(&utils::user_item(user_id)).await
    }
}
