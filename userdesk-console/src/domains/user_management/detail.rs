//! Single-record detail view, fetched by id independently of the list.

use log::debug;
use userdesk_core::TransportError;
use userdesk_model::{User, UserId};

use crate::common::{Generation, GenerationCounter};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailState {
    #[default]
    Closed,
    Loading {
        id: UserId,
    },
    Loaded(User),
    Failed {
        id: UserId,
        error: TransportError,
    },
}

#[derive(Debug, Default)]
pub struct DetailView {
    state: DetailState,
    generations: GenerationCounter,
}

impl DetailView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            DetailState::Loaded(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, DetailState::Closed)
    }

    /// Target the view at `id`; any fetch for a previous target is dropped.
    pub fn open(&mut self, id: UserId) -> Generation {
        self.state = DetailState::Loading { id };
        self.generations.advance()
    }

    /// Apply a fetch issued under `generation`.
    ///
    /// Returns false if the response was stale and ignored.
    pub fn finish(
        &mut self,
        generation: Generation,
        result: Result<User, TransportError>,
    ) -> bool {
        if !self.generations.is_current(generation) {
            debug!("Dropping stale user detail response ({})", generation);
            return false;
        }
        let DetailState::Loading { id } = self.state else {
            return false;
        };
        self.state = match result {
            Ok(user) => DetailState::Loaded(user),
            Err(error) => DetailState::Failed { id, error },
        };
        true
    }

    /// Id the view is targeted at, whatever its load state
    pub fn target(&self) -> Option<UserId> {
        match &self.state {
            DetailState::Closed => None,
            DetailState::Loading { id } | DetailState::Failed { id, .. } => {
                Some(*id)
            }
            DetailState::Loaded(user) => user.id,
        }
    }

    /// Swap in a freshly written record if the view is showing it.
    pub fn patch(&mut self, user: &User) {
        if let DetailState::Loaded(shown) = &mut self.state
            && shown.id.is_some()
            && shown.id == user.id
        {
            *shown = user.clone();
        }
    }

    pub fn close(&mut self) {
        self.generations.advance();
        self.state = DetailState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leanne() -> User {
        User {
            id: Some(UserId(1)),
            name: "Leanne Graham".into(),
            ..User::default()
        }
    }

    #[test]
    fn open_then_loaded() {
        let mut view = DetailView::new();
        let generation = view.open(UserId(1));
        assert_eq!(view.state(), &DetailState::Loading { id: UserId(1) });

        assert!(view.finish(generation, Ok(leanne())));
        assert_eq!(view.user().map(|u| u.name.as_str()), Some("Leanne Graham"));
    }

    #[test]
    fn failure_keeps_target_id() {
        let mut view = DetailView::new();
        let generation = view.open(UserId(42));
        let error = TransportError::Status {
            status: 404,
            body: "{}".into(),
        };

        assert!(view.finish(generation, Err(error.clone())));
        assert_eq!(
            view.state(),
            &DetailState::Failed {
                id: UserId(42),
                error
            }
        );
    }

    #[test]
    fn response_after_close_is_dropped() {
        let mut view = DetailView::new();
        let generation = view.open(UserId(1));
        view.close();

        assert!(!view.finish(generation, Ok(leanne())));
        assert_eq!(view.state(), &DetailState::Closed);
    }

    #[test]
    fn patch_only_touches_the_shown_record() {
        let mut view = DetailView::new();
        let generation = view.open(UserId(1));
        view.finish(generation, Ok(leanne()));

        view.patch(&User {
            id: Some(UserId(2)),
            name: "Ervin Howell".into(),
            ..User::default()
        });
        assert_eq!(view.user().map(|u| u.name.as_str()), Some("Leanne Graham"));

        view.patch(&User {
            name: "Leanne G.".into(),
            ..leanne()
        });
        assert_eq!(view.user().map(|u| u.name.as_str()), Some("Leanne G."));
        assert_eq!(view.target(), Some(UserId(1)));
    }

    #[test]
    fn retargeting_drops_the_earlier_fetch() {
        let mut view = DetailView::new();
        let first = view.open(UserId(1));
        let second = view.open(UserId(2));

        assert!(!view.finish(first, Ok(leanne())));
        assert_eq!(view.state(), &DetailState::Loading { id: UserId(2) });
        assert!(view.finish(
            second,
            Ok(User {
                id: Some(UserId(2)),
                ..User::default()
            })
        ));
    }
}
