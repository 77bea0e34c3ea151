use log::{debug, info, warn};

use crate::{
    common::{DomainUpdateResult, Task},
    domains::user_management::{
        NoticeContext, UserManagementDomainState,
        collection::RefreshOutcome,
        form::{SubmitOutcome, Submission},
        messages::{Message, UserManagementEvent},
    },
};

/// Handle user management domain messages
pub fn update_user_management(
    state: &mut UserManagementDomainState,
    message: Message,
) -> DomainUpdateResult {
    debug!("User management update: {}", message.name());

    match message {
        // List
        Message::LoadUsers => DomainUpdateResult::task(load_users(state)),

        Message::UsersLoaded { generation, result } => {
            match state.collection.finish_refresh(generation, result) {
                RefreshOutcome::Replaced(count) => {
                    info!("Successfully loaded {} users", count);
                    DomainUpdateResult::with_events(
                        Task::none(),
                        vec![UserManagementEvent::UsersLoaded(count)],
                    )
                }
                RefreshOutcome::Failed(error) => {
                    state.push_notice(NoticeContext::FetchUsers, error);
                    DomainUpdateResult::none()
                }
                RefreshOutcome::Stale => DomainUpdateResult::none(),
            }
        }

        Message::SearchChanged(term) => {
            debug!("Search term changed to {:?}", term);
            state.search_term = term;
            DomainUpdateResult::none()
        }

        // Detail
        Message::ShowUser(id) => {
            info!("Fetching details for user {}", id);
            let generation = state.detail.open(id);
            let service = state.service.clone();
            DomainUpdateResult::task(Task::perform(
                async move { service.get_user(id).await },
                move |result| Message::UserDetailLoaded { generation, result },
            ))
        }

        Message::UserDetailLoaded { generation, result } => {
            let failure = result.as_ref().err().cloned();
            if !state.detail.finish(generation, result) {
                return DomainUpdateResult::none();
            }
            match failure {
                Some(error) => {
                    state.push_notice(NoticeContext::FetchUserDetail, error);
                    DomainUpdateResult::none()
                }
                None => {
                    let events = state
                        .detail
                        .target()
                        .map(UserManagementEvent::UserDetailLoaded)
                        .into_iter()
                        .collect();
                    DomainUpdateResult::with_events(Task::none(), events)
                }
            }
        }

        Message::CloseUserDetail => {
            state.detail.close();
            DomainUpdateResult::none()
        }

        // Form session
        Message::CreateUser => {
            info!("Starting user creation flow");
            state.form.open_create();
            DomainUpdateResult::none()
        }

        Message::EditUser(id) => {
            match state.collection.get(id) {
                Some(user) => {
                    info!("Editing user {} ({})", id, user.name);
                    let user = user.clone();
                    state.form.open_edit(&user);
                }
                None => warn!("Cannot edit user {}: not in the list", id),
            }
            DomainUpdateResult::none()
        }

        Message::FormFieldChanged(key, value) => {
            debug!("Updating form field {}", key);
            state.form.set_field(key, value);
            DomainUpdateResult::none()
        }

        Message::FormSubmit => submit_form(state),

        Message::FormCancel => {
            debug!("Form cancelled");
            state.form.cancel();
            DomainUpdateResult::none()
        }

        Message::CreateUserSuccess { generation, user } => {
            if state.form.submit_succeeded(generation).is_none() {
                debug!("Dropping stale create response ({})", generation);
                return DomainUpdateResult::none();
            }
            info!("User created successfully: {}", user.name);
            // The new record is fetched back rather than inserted locally.
            DomainUpdateResult::task(load_users(state))
                .add_event(UserManagementEvent::UserCreated(user))
        }

        Message::CreateUserError { generation, error } => {
            if state.form.submit_failed(generation) {
                state.push_notice(NoticeContext::CreateUser, error);
            }
            DomainUpdateResult::none()
        }

        Message::UpdateUserSuccess {
            generation,
            id,
            mut user,
        } => {
            if state.form.submit_succeeded(generation).is_none() {
                debug!("Dropping stale update response ({})", generation);
                return DomainUpdateResult::none();
            }
            if user.id.is_none() {
                user.id = Some(id);
            }
            info!("User {} updated successfully", id);
            state.collection.apply_update(user.clone());
            state.detail.patch(&user);
            DomainUpdateResult::with_events(
                Task::none(),
                vec![UserManagementEvent::UserUpdated(user)],
            )
        }

        Message::UpdateUserError { generation, error } => {
            if state.form.submit_failed(generation) {
                state.push_notice(NoticeContext::UpdateUser, error);
            }
            DomainUpdateResult::none()
        }

        // Deletion
        Message::DeleteUser(id) => {
            info!("Requesting delete confirmation for user {}", id);
            state.pending_delete = Some(id);
            DomainUpdateResult::with_events(
                Task::none(),
                vec![UserManagementEvent::DeleteConfirmationRequested(id)],
            )
        }

        Message::DeleteUserConfirm(id) => {
            if state.pending_delete != Some(id) {
                warn!("Ignoring unrequested delete confirmation for {}", id);
                return DomainUpdateResult::none();
            }
            state.pending_delete = None;
            info!("Deleting user {}", id);
            let generation = state.collection.mount_generation();
            let service = state.service.clone();
            DomainUpdateResult::task(Task::perform(
                async move { service.delete_user(id).await },
                move |result| match result {
                    Ok(()) => Message::DeleteUserSuccess { generation, id },
                    Err(error) => Message::DeleteUserError {
                        generation,
                        id,
                        error,
                    },
                },
            ))
        }

        Message::DeleteUserCancel => {
            debug!("Delete cancelled");
            state.pending_delete = None;
            DomainUpdateResult::none()
        }

        Message::DeleteUserSuccess { generation, id } => {
            if !state.collection.is_mounted(generation) {
                debug!("Dropping stale delete response for {}", id);
                return DomainUpdateResult::none();
            }
            info!("User {} deleted", id);
            state.collection.apply_delete(id);
            if state.detail.target() == Some(id) {
                state.detail.close();
            }
            DomainUpdateResult::with_events(
                Task::none(),
                vec![UserManagementEvent::UserDeleted(id)],
            )
        }

        Message::DeleteUserError {
            generation,
            id,
            error,
        } => {
            if state.collection.is_mounted(generation) {
                debug!("Delete of user {} failed", id);
                state.push_notice(NoticeContext::DeleteUser, error);
            }
            DomainUpdateResult::none()
        }

        // Housekeeping
        Message::DismissNotices => {
            state.notices.clear();
            DomainUpdateResult::none()
        }

        Message::Unmount => {
            info!("Tearing down user management view");
            state.collection.unmount();
            state.detail.close();
            state.form.cancel();
            state.pending_delete = None;
            DomainUpdateResult::none()
        }
    }
}

fn load_users(state: &mut UserManagementDomainState) -> Task<Message> {
    info!("Loading users from server");
    let generation = state.collection.begin_refresh();
    let service = state.service.clone();
    Task::perform(async move { service.list_users().await }, move |result| {
        Message::UsersLoaded { generation, result }
    })
}

fn submit_form(state: &mut UserManagementDomainState) -> DomainUpdateResult {
    match state.form.submit() {
        SubmitOutcome::NotOpen => {
            warn!("Submit with no open form");
            DomainUpdateResult::none()
        }
        SubmitOutcome::AlreadySubmitting => {
            debug!("Submit ignored: already in flight");
            DomainUpdateResult::none()
        }
        SubmitOutcome::Invalid(errors) => {
            info!("Form has {} invalid field(s)", errors.len());
            DomainUpdateResult::with_events(
                Task::none(),
                vec![UserManagementEvent::ValidationFailed(errors)],
            )
        }
        SubmitOutcome::Ready {
            generation,
            submission,
        } => {
            let service = state.service.clone();
            let task = match submission {
                Submission::Create(payload) => {
                    info!("Submitting new user {}", payload.name);
                    Task::perform(
                        async move { service.create_user(payload).await },
                        move |result| match result {
                            Ok(user) => {
                                Message::CreateUserSuccess { generation, user }
                            }
                            Err(error) => {
                                Message::CreateUserError { generation, error }
                            }
                        },
                    )
                }
                Submission::Update { id, user } => {
                    info!("Submitting changes to user {}", id);
                    Task::perform(
                        async move { service.update_user(id, user).await },
                        move |result| match result {
                            Ok(user) => Message::UpdateUserSuccess {
                                generation,
                                id,
                                user,
                            },
                            Err(error) => {
                                Message::UpdateUserError { generation, error }
                            }
                        },
                    )
                }
            };
            DomainUpdateResult::task(task)
        }
    }
}
