use userdesk_core::{TransportError, ValidationResult};
use userdesk_model::{FieldKey, User, UserId};

use crate::common::Generation;

#[derive(Clone, Debug)]
pub enum Message {
    // List
    LoadUsers,
    UsersLoaded {
        generation: Generation,
        result: Result<Vec<User>, TransportError>,
    },
    SearchChanged(String),

    // Detail
    ShowUser(UserId),
    UserDetailLoaded {
        generation: Generation,
        result: Result<User, TransportError>,
    },
    CloseUserDetail,

    // Form session
    CreateUser,
    EditUser(UserId),
    FormFieldChanged(FieldKey, String),
    FormSubmit,
    FormCancel,
    CreateUserSuccess {
        generation: Generation,
        user: User,
    },
    CreateUserError {
        generation: Generation,
        error: TransportError,
    },
    UpdateUserSuccess {
        generation: Generation,
        id: UserId,
        user: User,
    },
    UpdateUserError {
        generation: Generation,
        error: TransportError,
    },

    // Deletion
    DeleteUser(UserId),
    DeleteUserConfirm(UserId),
    DeleteUserCancel,
    DeleteUserSuccess {
        generation: Generation,
        id: UserId,
    },
    DeleteUserError {
        generation: Generation,
        id: UserId,
        error: TransportError,
    },

    // Housekeeping
    DismissNotices,
    Unmount,
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            // List
            Self::LoadUsers => "UserManagement::LoadUsers",
            Self::UsersLoaded { .. } => "UserManagement::UsersLoaded",
            Self::SearchChanged(_) => "UserManagement::SearchChanged",

            // Detail
            Self::ShowUser(_) => "UserManagement::ShowUser",
            Self::UserDetailLoaded { .. } => "UserManagement::UserDetailLoaded",
            Self::CloseUserDetail => "UserManagement::CloseUserDetail",

            // Form session
            Self::CreateUser => "UserManagement::CreateUser",
            Self::EditUser(_) => "UserManagement::EditUser",
            Self::FormFieldChanged(..) => "UserManagement::FormFieldChanged",
            Self::FormSubmit => "UserManagement::FormSubmit",
            Self::FormCancel => "UserManagement::FormCancel",
            Self::CreateUserSuccess { .. } => {
                "UserManagement::CreateUserSuccess"
            }
            Self::CreateUserError { .. } => "UserManagement::CreateUserError",
            Self::UpdateUserSuccess { .. } => {
                "UserManagement::UpdateUserSuccess"
            }
            Self::UpdateUserError { .. } => "UserManagement::UpdateUserError",

            // Deletion
            Self::DeleteUser(_) => "UserManagement::DeleteUser",
            Self::DeleteUserConfirm(_) => "UserManagement::DeleteUserConfirm",
            Self::DeleteUserCancel => "UserManagement::DeleteUserCancel",
            Self::DeleteUserSuccess { .. } => {
                "UserManagement::DeleteUserSuccess"
            }
            Self::DeleteUserError { .. } => "UserManagement::DeleteUserError",

            // Housekeeping
            Self::DismissNotices => "UserManagement::DismissNotices",
            Self::Unmount => "UserManagement::Unmount",
        }
    }
}

/// Outcomes the front-end may want to report as they happen.
///
/// Failures are not events; they go to the notice queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserManagementEvent {
    UsersLoaded(usize),
    UserDetailLoaded(UserId),
    ValidationFailed(ValidationResult),
    UserCreated(User),
    UserUpdated(User),
    DeleteConfirmationRequested(UserId),
    UserDeleted(UserId),
}
