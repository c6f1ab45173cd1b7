//! State behind the notes screen: the cached list, the loading flag,
//! the error banner and the compose and delete dialogs.
//!
//! Every server round trip goes through [`NotesApi`]; the cache is only
//! changed from successful responses.

mod banner;

use std::collections::HashMap;
use data::validation::{NoteField, ValidationRules};
use data::{Note, NoteDraft, NoteId};
use log::{debug, warn};
use crate::api::NotesApi;
use crate::constants::{CREATE_FAILED_MESSAGE, DELETE_FAILED_MESSAGE, ERROR_DISMISS_DELAY, FETCH_ERROR_MESSAGE, FETCH_FAILED_MESSAGE, UPDATE_FAILED_MESSAGE};
use banner::ErrorBanner;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ComposeDialog {
    Closed,
    Create,
    Edit(NoteId),
}

/// Contents of the compose dialog with per-field error messages
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NoteForm {
    pub draft: NoteDraft,
    pub errors: HashMap<NoteField, String>,
}

impl NoteForm {
    fn from_note(note: &Note) -> Self {
        NoteForm {
            draft: NoteDraft::from(note),
            errors: HashMap::new(),
        }
    }

    pub fn error(&self, field: NoteField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubmitOutcome {
    /// Nothing was sent, see the form errors
    Invalid,
    Saved(Note),
    /// The request failed and the banner says so
    Failed,
    NoDialog,
}

pub struct NotesView<A: NotesApi> {
    api: A,
    rules: ValidationRules,
    notes: Vec<Note>,
    is_loading: bool,
    banner: ErrorBanner,
    compose: ComposeDialog,
    form: NoteForm,
    pending_delete: Option<NoteId>,
}

impl<A: NotesApi> NotesView<A> {
    pub fn new(api: A) -> Self {
        NotesView {
            api,
            rules: ValidationRules::client(),
            notes: Vec::new(),
            is_loading: true,
            banner: ErrorBanner::new(ERROR_DISMISS_DELAY),
            compose: ComposeDialog::Closed,
            form: NoteForm::default(),
            pending_delete: None,
        }
    }

    /// Fetches the whole list, replacing the cache
    pub async fn mount(&mut self) {
        self.is_loading = true;
        match self.api.get_all().await {
            Ok(notes) => {
                debug!("fetched {} notes", notes.len());
                self.notes = notes;
            },
            Err(e) => {
                warn!("fetching notes failed: {e}");
                self.notes.clear();
                self.banner.show(
                    if e.is_rejection() {
                        FETCH_FAILED_MESSAGE
                    } else {
                        FETCH_ERROR_MESSAGE
                    }
                );
            },
        }
        self.is_loading = false;
    }

    /// Drops the banner and its pending dismissal
    pub fn unmount(&mut self) {
        self.banner.clear();
        self.compose = ComposeDialog::Closed;
        self.form = NoteForm::default();
        self.pending_delete = None;
    }

    pub fn open_create(&mut self) {
        self.compose = ComposeDialog::Create;
        self.form = NoteForm::default();
    }

    /// Returns false if the note is not in the cache
    pub fn open_edit(&mut self, id: NoteId) -> bool {
        let Some(note) = self.note(id) else {
            return false
        };
        self.form = NoteForm::from_note(note);
        self.compose = ComposeDialog::Edit(id);
        true
    }

    pub fn close_compose(&mut self) {
        self.compose = ComposeDialog::Closed;
        self.form = NoteForm::default();
    }

    pub fn set_field(&mut self, field: NoteField, value: impl Into<String>) {
        let value = value.into();
        match field {
            NoteField::Title => self.form.draft.title = value,
            NoteField::Description => self.form.draft.description = value,
        }
        self.form.errors.remove(&field);
    }

    /// Validates the form and sends it as a create or an update,
    /// depending on how the dialog was opened
    pub async fn submit(&mut self) -> SubmitOutcome {
        let compose = self.compose;
        if compose == ComposeDialog::Closed {
            return SubmitOutcome::NoDialog
        }
        if !self.validate_form() {
            return SubmitOutcome::Invalid
        }
        let saved = match compose {
            ComposeDialog::Create => self.create_note().await,
            ComposeDialog::Edit(id) => self.update_note(id).await,
            ComposeDialog::Closed => return SubmitOutcome::NoDialog,
        };
        match saved {
            Some(note) => {
                self.close_compose();
                SubmitOutcome::Saved(note)
            },
            None => SubmitOutcome::Failed,
        }
    }

    fn validate_form(&mut self) -> bool {
        self.form.errors = match self.rules.validate(&self.form.draft) {
            Ok(()) => HashMap::new(),
            Err(errors) => errors.errors()
                .iter()
                .map(|e| (e.field, e.message()))
                .collect(),
        };
        self.form.errors.is_empty()
    }

    async fn create_note(&mut self) -> Option<Note> {
        match self.api.create(&self.form.draft).await {
            Ok(note) => {
                debug!("created note {}", note.id);
                self.notes.push(note.clone());
                Some(note)
            },
            Err(e) => {
                warn!("creating a note failed: {e}");
                self.banner.show(CREATE_FAILED_MESSAGE);
                None
            },
        }
    }

    async fn update_note(&mut self, id: NoteId) -> Option<Note> {
        match self.api.update(id, &self.form.draft).await {
            Ok(note) => {
                debug!("updated note {id}");
                if let Some(cached) = self.notes.iter_mut().find(|n| n.id == note.id) {
                    *cached = note.clone();
                }
                Some(note)
            },
            Err(e) => {
                warn!("updating note {id} failed: {e}");
                self.banner.show(UPDATE_FAILED_MESSAGE);
                None
            },
        }
    }

    /// Opens the delete confirmation
    pub fn request_delete(&mut self, id: NoteId) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the note awaiting confirmation. The confirmation stays open
    /// when the request fails.
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.pending_delete else {
            return false
        };
        match self.api.delete(id).await {
            Ok(()) => {
                debug!("deleted note {id}");
                self.notes.retain(|n| n.id != id);
                self.pending_delete = None;
                true
            },
            Err(e) => {
                warn!("deleting note {id} failed: {e}");
                self.banner.show(DELETE_FAILED_MESSAGE);
                false
            },
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.banner.message()
    }

    pub fn dismiss_error(&mut self) {
        self.banner.clear();
    }

    pub fn compose(&self) -> ComposeDialog {
        self.compose
    }

    pub fn form(&self) -> &NoteForm {
        &self.form
    }

    pub fn pending_delete(&self) -> Option<NoteId> {
        self.pending_delete
    }
}
