//! User management domain
//!
//! Owns the user collection, the detail view, the form session and the
//! notice queue. All changes go through [`UserManagementDomain::update`].

pub mod collection;
pub mod detail;
pub mod form;
pub mod messages;
pub mod update;

use std::{fmt, sync::Arc};

use userdesk_core::TransportError;
use userdesk_model::{User, UserId};

use self::collection::UserCollection;
use self::detail::DetailView;
use self::form::FormSession;
use self::messages::Message as UserManagementMessage;
use crate::common::DomainUpdateResult;
use crate::infra::services::user_management::UserAdminService;

/// Which operation a surfaced failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeContext {
    FetchUsers,
    FetchUserDetail,
    CreateUser,
    UpdateUser,
    DeleteUser,
}

impl NoticeContext {
    pub fn prefix(self) -> &'static str {
        match self {
            NoticeContext::FetchUsers => "Error fetching users",
            NoticeContext::FetchUserDetail => "Error fetching user details",
            NoticeContext::CreateUser => "Error creating user",
            NoticeContext::UpdateUser => "Error updating user",
            NoticeContext::DeleteUser => "Error deleting user",
        }
    }
}

/// A remote failure waiting to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub context: NoticeContext,
    pub error: TransportError,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context.prefix(), self.error)
    }
}

/// User management domain state
pub struct UserManagementDomainState {
    pub service: Arc<dyn UserAdminService>,
    pub collection: UserCollection,
    pub search_term: String,
    pub detail: DetailView,
    pub form: FormSession,
    /// Id awaiting delete confirmation
    pub pending_delete: Option<UserId>,
    pub notices: Vec<Notice>,
}

impl UserManagementDomainState {
    pub fn new(service: Arc<dyn UserAdminService>) -> Self {
        Self {
            service,
            collection: UserCollection::new(),
            search_term: String::new(),
            detail: DetailView::new(),
            form: FormSession::new(),
            pending_delete: None,
            notices: Vec::new(),
        }
    }

    pub(crate) fn push_notice(
        &mut self,
        context: NoticeContext,
        error: TransportError,
    ) {
        let notice = Notice { context, error };
        log::error!("{}", notice);
        self.notices.push(notice);
    }
}

impl fmt::Debug for UserManagementDomainState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserManagementDomainState")
            .field("collection", &self.collection)
            .field("search_term", &self.search_term)
            .field("detail", &self.detail)
            .field("form", &self.form)
            .field("pending_delete", &self.pending_delete)
            .field("notices", &self.notices)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct UserManagementDomain {
    pub state: UserManagementDomainState,
}

impl UserManagementDomain {
    pub fn new(state: UserManagementDomainState) -> Self {
        Self { state }
    }

    pub fn with_service(service: Arc<dyn UserAdminService>) -> Self {
        Self::new(UserManagementDomainState::new(service))
    }

    pub fn update(
        &mut self,
        message: UserManagementMessage,
    ) -> DomainUpdateResult {
        update::update_user_management(&mut self.state, message)
    }

    /// The list as currently filtered by the search term.
    pub fn filtered_users(&self) -> Vec<&User> {
        self.state.collection.filtered_view(&self.state.search_term)
    }

    pub fn notices(&self) -> &[Notice] {
        &self.state.notices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_use_operation_prefix() {
        let notice = Notice {
            context: NoticeContext::DeleteUser,
            error: TransportError::Network("connection refused".into()),
        };
        assert_eq!(
            notice.to_string(),
            "Error deleting user: Network error: connection refused"
        );
    }
}
