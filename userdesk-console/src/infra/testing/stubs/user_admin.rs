use std::{
    collections::HashSet,
    sync::{Arc, PoisonError, RwLock},
};

use async_trait::async_trait;
use userdesk_core::TransportError;
use userdesk_model::{Address, Company, NewUser, User, UserId};

use crate::infra::services::user_management::UserAdminService;

/// Operations of [`UserAdminService`], used to inject failures and to
/// inspect the call log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StubOperation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubCall {
    List,
    Get(UserId),
    Create(NewUser),
    Update(UserId, User),
    Delete(UserId),
}

impl StubCall {
    pub fn operation(&self) -> StubOperation {
        match self {
            StubCall::List => StubOperation::List,
            StubCall::Get(_) => StubOperation::Get,
            StubCall::Create(_) => StubOperation::Create,
            StubCall::Update(..) => StubOperation::Update,
            StubCall::Delete(_) => StubOperation::Delete,
        }
    }
}

/// In-memory [`UserAdminService`] backing tests and the offline demo.
#[derive(Debug, Clone, Default)]
pub struct StubUserAdminService {
    inner: Arc<RwLock<InnerState>>,
}

#[derive(Debug, Default)]
struct InnerState {
    users: Vec<User>,
    failing: HashSet<StubOperation>,
    calls: Vec<StubCall>,
}

impl StubUserAdminService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(self, users: Vec<User>) -> Self {
        self.write(|state| state.users = users);
        self
    }

    /// Seeded with a handful of records shaped like the public demo service.
    pub fn with_demo_users() -> Self {
        Self::new().with_users(demo_users())
    }

    /// Make every call of `operation` fail until [`Self::succeed`].
    pub fn fail(&self, operation: StubOperation) {
        self.write(|state| {
            state.failing.insert(operation);
        });
    }

    pub fn succeed(&self, operation: StubOperation) {
        self.write(|state| {
            state.failing.remove(&operation);
        });
    }

    pub fn users(&self) -> Vec<User> {
        self.read(|state| state.users.clone())
    }

    pub fn calls(&self) -> Vec<StubCall> {
        self.read(|state| state.calls.clone())
    }

    pub fn call_count(&self, operation: StubOperation) -> usize {
        self.read(|state| {
            state
                .calls
                .iter()
                .filter(|call| call.operation() == operation)
                .count()
        })
    }

    fn read<R>(&self, f: impl FnOnce(&InnerState) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write<R>(&self, f: impl FnOnce(&mut InnerState) -> R) -> R {
        let mut guard =
            self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Record `call`, then either fail or run `f`.
    fn record<R>(
        &self,
        call: StubCall,
        f: impl FnOnce(&mut InnerState) -> Result<R, TransportError>,
    ) -> Result<R, TransportError> {
        self.write(|state| {
            let operation = call.operation();
            state.calls.push(call);
            if state.failing.contains(&operation) {
                return Err(TransportError::Network(format!(
                    "stubbed {operation:?} failure"
                )));
            }
            f(state)
        })
    }
}

fn not_found(user_id: UserId) -> TransportError {
    TransportError::Status {
        status: 404,
        body: format!("user {user_id} not found"),
    }
}

#[async_trait]
impl UserAdminService for StubUserAdminService {
    async fn list_users(&self) -> Result<Vec<User>, TransportError> {
        self.record(StubCall::List, |state| Ok(state.users.clone()))
    }

    async fn get_user(&self, user_id: UserId) -> Result<User, TransportError> {
        self.record(StubCall::Get(user_id), |state| {
            state
                .users
                .iter()
                .find(|u| u.has_id(user_id))
                .cloned()
                .ok_or_else(|| not_found(user_id))
        })
    }

    async fn create_user(&self, user: NewUser) -> Result<User, TransportError> {
        self.record(StubCall::Create(user.clone()), |state| {
            let next = state
                .users
                .iter()
                .filter_map(|u| u.id)
                .map(UserId::get)
                .max()
                .unwrap_or(0)
                + 1;
            let created = user.into_user(UserId(next));
            state.users.push(created.clone());
            Ok(created)
        })
    }

    async fn update_user(
        &self,
        user_id: UserId,
        user: User,
    ) -> Result<User, TransportError> {
        self.record(StubCall::Update(user_id, user.clone()), |state| {
            let slot = state
                .users
                .iter_mut()
                .find(|u| u.has_id(user_id))
                .ok_or_else(|| not_found(user_id))?;
            *slot = User {
                id: Some(user_id),
                ..user
            };
            Ok(slot.clone())
        })
    }

    async fn delete_user(&self, user_id: UserId) -> Result<(), TransportError> {
        self.record(StubCall::Delete(user_id), |state| {
            let before = state.users.len();
            state.users.retain(|u| !u.has_id(user_id));
            if state.users.len() == before {
                return Err(not_found(user_id));
            }
            Ok(())
        })
    }
}

pub fn demo_users() -> Vec<User> {
    vec![
        User {
            id: Some(UserId(1)),
            name: "Leanne Graham".into(),
            username: "Bret".into(),
            email: "Sincere@april.biz".into(),
            phone: "17707368031".into(),
            address: Address {
                street: "Kulas Light".into(),
                city: "Gwenborough".into(),
            },
            company: Company {
                name: "Romaguera-Crona".into(),
            },
            website: "http://hildegard.org".into(),
        },
        User {
            id: Some(UserId(2)),
            name: "Ervin Howell".into(),
            username: "Antonette".into(),
            email: "Shanna@melissa.tv".into(),
            phone: "+10106926593".into(),
            address: Address {
                street: "Victor Plains".into(),
                city: "Wisokyburgh".into(),
            },
            company: Company {
                name: "Deckow-Crist".into(),
            },
            website: "http://anastasia.net".into(),
        },
        User {
            id: Some(UserId(3)),
            name: "Clementine Bauch".into(),
            username: "Samantha".into(),
            email: "Nathan@yesenia.net".into(),
            phone: "14631234447".into(),
            address: Address {
                street: "Douglas Extension".into(),
                city: "McKenziehaven".into(),
            },
            company: Company {
                name: "Romaguera-Jacobson".into(),
            },
            website: "http://ramiro.info".into(),
        },
        User {
            id: Some(UserId(4)),
            name: "Patricia Lebsack".into(),
            username: "Karianne".into(),
            email: "Julianne.OConner@kory.org".into(),
            phone: "4931709623".into(),
            address: Address {
                street: "Hoeger Mall".into(),
                city: "South Elvis".into(),
            },
            company: Company {
                name: "Robel-Corkery".into(),
            },
            website: "http://kale.biz".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_next_id_and_logs_call() {
        let stub = StubUserAdminService::with_demo_users();
        let created = stub
            .create_user(NewUser {
                name: "Ann Lee".into(),
                username: "USER-Ann".into(),
                ..NewUser::default()
            })
            .await
            .unwrap();
        assert_eq!(created.id, Some(UserId(5)));
        assert_eq!(stub.users().len(), 5);
        assert_eq!(stub.call_count(StubOperation::Create), 1);
    }

    #[tokio::test]
    async fn injected_failures_leave_data_untouched() {
        let stub = StubUserAdminService::with_demo_users();
        stub.fail(StubOperation::Delete);
        assert!(stub.delete_user(UserId(1)).await.is_err());
        assert_eq!(stub.users().len(), 4);

        stub.succeed(StubOperation::Delete);
        stub.delete_user(UserId(1)).await.unwrap();
        assert_eq!(stub.users().len(), 3);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let stub = StubUserAdminService::with_demo_users();
        let err = stub.get_user(UserId(99)).await.unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 404, .. }));
    }
}
