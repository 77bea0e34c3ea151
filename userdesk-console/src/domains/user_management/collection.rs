//! Authoritative in-memory list of users backing the list view.
//!
//! The collection is only ever mutated here, through [`UserCollection::finish_refresh`],
//! [`UserCollection::apply_update`] and [`UserCollection::apply_delete`], and only after the
//! corresponding remote call has succeeded.

use log::{debug, warn};
use userdesk_core::TransportError;
use userdesk_model::{User, UserId};

use crate::common::{Generation, GenerationCounter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectionLoadState {
    /// Nothing fetched yet
    #[default]
    Empty,
    /// A full fetch is outstanding
    Loading,
    /// At least one fetch has succeeded
    Ready,
}

/// Outcome of feeding a list response back into the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Collection replaced; carries the new length
    Replaced(usize),
    /// Fetch failed; collection left as it was
    Failed(TransportError),
    /// Response belonged to a superseded fetch or an unmounted view
    Stale,
}

#[derive(Debug, Default)]
pub struct UserCollection {
    users: Vec<User>,
    load_state: CollectionLoadState,
    has_loaded: bool,
    fetches: GenerationCounter,
    mount: GenerationCounter,
}

impl UserCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection directly, as if a fetch had returned `users`.
    pub fn from_users(users: Vec<User>) -> Self {
        Self {
            users,
            load_state: CollectionLoadState::Ready,
            has_loaded: true,
            ..Self::default()
        }
    }

    pub fn load_state(&self) -> CollectionLoadState {
        self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == CollectionLoadState::Loading
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.has_id(id))
    }

    /// Mark a full fetch as outstanding.
    ///
    /// Returns the generation the response must carry; any earlier fetch
    /// still in flight is superseded.
    pub fn begin_refresh(&mut self) -> Generation {
        self.load_state = CollectionLoadState::Loading;
        self.fetches.advance()
    }

    /// Apply a list response issued under `generation`.
    pub fn finish_refresh(
        &mut self,
        generation: Generation,
        result: Result<Vec<User>, TransportError>,
    ) -> RefreshOutcome {
        if !self.fetches.is_current(generation) {
            debug!("Dropping stale user list response ({})", generation);
            return RefreshOutcome::Stale;
        }

        let outcome = match result {
            Ok(users) => {
                self.users = users;
                self.has_loaded = true;
                RefreshOutcome::Replaced(self.users.len())
            }
            Err(error) => RefreshOutcome::Failed(error),
        };

        self.load_state = if self.has_loaded {
            CollectionLoadState::Ready
        } else {
            CollectionLoadState::Empty
        };
        outcome
    }

    /// Replace the entry with the same id, keeping its position.
    ///
    /// Returns false (and changes nothing) if `user` has no id or no entry
    /// matches.
    pub fn apply_update(&mut self, user: User) -> bool {
        let Some(id) = user.id else {
            warn!("Ignoring update for a user without an id");
            return false;
        };
        match self.users.iter_mut().find(|u| u.has_id(id)) {
            Some(slot) => {
                *slot = user;
                true
            }
            None => {
                warn!("Ignoring update for user {} not in collection", id);
                false
            }
        }
    }

    /// Remove the entry with `id` without reordering the rest.
    pub fn apply_delete(&mut self, id: UserId) -> bool {
        let before = self.users.len();
        self.users.retain(|u| !u.has_id(id));
        self.users.len() != before
    }

    /// Users whose name contains `term`, ignoring case, in collection order.
    pub fn filtered_view(&self, term: &str) -> Vec<&User> {
        let needle = term.to_lowercase();
        self.users
            .iter()
            .filter(|u| u.name_contains(&needle))
            .collect()
    }

    /// Generation of the mounted view; write responses (deletes) carry it.
    pub fn mount_generation(&self) -> Generation {
        self.mount.current()
    }

    pub fn is_mounted(&self, generation: Generation) -> bool {
        self.mount.is_current(generation)
    }

    /// Tear the view down: every response still in flight will be dropped.
    pub fn unmount(&mut self) {
        self.mount.advance();
        self.fetches.advance();
        if self.load_state == CollectionLoadState::Loading {
            self.load_state = if self.has_loaded {
                CollectionLoadState::Ready
            } else {
                CollectionLoadState::Empty
            };
        }
    }
}
