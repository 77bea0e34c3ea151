//! Create/edit form session.
//!
//! At most one form is open at a time. The draft survives validation errors
//! and transport failures so the user can fix or retry; it is discarded only
//! on cancel or on a successful submit.

use log::debug;
use userdesk_core::validation::{ValidationResult, validate, validate_field};
use userdesk_model::{FieldKey, NewUser, User, UserDraft, UserId};

use crate::common::{Generation, GenerationCounter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: UserId, source: User },
}

impl FormMode {
    pub fn is_create(&self) -> bool {
        matches!(self, FormMode::Create)
    }
}

/// Where the draft stands relative to validation and submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftStatus {
    /// Untouched since the form opened
    Pristine,
    /// Edited, not yet validated
    Dirty,
    /// Last submit attempt failed validation
    Invalid,
    /// Valid and handed to the service; awaiting the response
    Submitting,
}

#[derive(Debug, Clone)]
pub struct OpenForm {
    pub mode: FormMode,
    pub draft: UserDraft,
    pub errors: ValidationResult,
    pub status: DraftStatus,
}

impl OpenForm {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub enum FormState {
    #[default]
    Closed,
    Open(OpenForm),
}

/// The remote write a valid draft turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(NewUser),
    Update { id: UserId, user: User },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    NotOpen,
    /// A submission is already in flight
    AlreadySubmitting,
    /// Validation failed; errors are attached to the open form
    Invalid(ValidationResult),
    Ready {
        generation: Generation,
        submission: Submission,
    },
}

#[derive(Debug, Default)]
pub struct FormSession {
    state: FormState,
    generations: GenerationCounter,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn open_form(&self) -> Option<&OpenForm> {
        match &self.state {
            FormState::Open(form) => Some(form),
            FormState::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, FormState::Open(_))
    }

    fn open(&mut self, mode: FormMode, draft: UserDraft) {
        // Anything still in flight from a previous session is abandoned.
        self.generations.advance();
        self.state = FormState::Open(OpenForm {
            mode,
            draft,
            errors: ValidationResult::new(),
            status: DraftStatus::Pristine,
        });
    }

    pub fn open_create(&mut self) {
        self.open(FormMode::Create, UserDraft::default());
    }

    /// Open an edit session on a copy of `source`.
    ///
    /// Returns false if `source` has no id, since it could not be updated.
    pub fn open_edit(&mut self, source: &User) -> bool {
        let Some(id) = source.id else {
            return false;
        };
        self.open(
            FormMode::Edit {
                id,
                source: source.clone(),
            },
            UserDraft::from_user(source),
        );
        true
    }

    /// Edit one slot of the draft.
    ///
    /// A field already flagged is re-checked so its message clears as soon
    /// as it is fixed; other fields are not validated until submit.
    pub fn set_field(&mut self, key: FieldKey, value: impl Into<String>) {
        let FormState::Open(form) = &mut self.state else {
            debug!("Ignoring edit of {} with no open form", key);
            return;
        };
        form.draft.set(key, value);
        if form.errors.contains(key) {
            form.errors.set(key, validate_field(&form.draft, key));
        }
        if form.status != DraftStatus::Submitting {
            form.status = DraftStatus::Dirty;
        }
    }

    /// Validate the draft and, if clean, produce the remote write.
    pub fn submit(&mut self) -> SubmitOutcome {
        let FormState::Open(form) = &mut self.state else {
            return SubmitOutcome::NotOpen;
        };
        if form.status == DraftStatus::Submitting {
            return SubmitOutcome::AlreadySubmitting;
        }

        form.errors = validate(&form.draft);
        if form.has_errors() {
            form.status = DraftStatus::Invalid;
            return SubmitOutcome::Invalid(form.errors.clone());
        }

        form.status = DraftStatus::Submitting;
        let submission = match &form.mode {
            FormMode::Create => Submission::Create(form.draft.to_new_user()),
            FormMode::Edit { id, source } => Submission::Update {
                id: *id,
                user: form.draft.to_user(source),
            },
        };
        SubmitOutcome::Ready {
            generation: self.generations.current(),
            submission,
        }
    }

    /// The write issued under `generation` succeeded: close the form.
    ///
    /// Returns the mode that was closed, or `None` if the response is stale.
    pub fn submit_succeeded(
        &mut self,
        generation: Generation,
    ) -> Option<FormMode> {
        if !self.generations.is_current(generation) {
            return None;
        }
        let FormState::Open(form) = std::mem::take(&mut self.state) else {
            return None;
        };
        self.generations.advance();
        Some(form.mode)
    }

    /// The write issued under `generation` failed: stay open, keep the draft.
    ///
    /// Returns false if the response is stale.
    pub fn submit_failed(&mut self, generation: Generation) -> bool {
        if !self.generations.is_current(generation) {
            return false;
        }
        match &mut self.state {
            FormState::Open(form) => {
                form.status = DraftStatus::Dirty;
                true
            }
            FormState::Closed => false,
        }
    }

    /// Close without submitting; a response still in flight will be dropped.
    pub fn cancel(&mut self) {
        self.generations.advance();
        self.state = FormState::Closed;
    }
}
