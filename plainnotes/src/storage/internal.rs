use std::collections::HashSet;
use data::validation::ValidationRules;
use data::{Note, NoteDraft, NoteId};
use log::{debug, error, trace, warn};
use tokio::sync::Mutex;

use crate::config::app_config::AppConfig;
use crate::storage::errors::StorageError;
use io_trait::{NoteStorageIo, ProductionNoteStorageIo};

pub mod io_trait;
#[cfg(test)] mod tests;

pub type NoteStore = NoteStoreImpl<ProductionNoteStorageIo>;

/// The authoritative note list.
///
/// Every operation, reads included, goes through one mutex, and a
/// mutation is only kept once the backing medium accepted the new list.
pub struct NoteStoreImpl<Io: NoteStorageIo> {
    io: Io,
    rules: ValidationRules,
    notes: Mutex<Vec<Note>>,
}

impl NoteStore {
    pub async fn new(
        app_config: &AppConfig,
    ) -> Result<NoteStore, StorageError> {
        Self::new_internal(
            ProductionNoteStorageIo::from(&app_config.storage),
            app_config.validation_rules(),
        ).await
    }
}

impl<Io: NoteStorageIo> NoteStoreImpl<Io> {
    async fn new_internal(
        io: Io,
        rules: ValidationRules,
    ) -> Result<NoteStoreImpl<Io>, StorageError> {
        let notes = io.load().await?;
        let mut seen = HashSet::with_capacity(notes.len());
        if let Some(duplicate) = notes.iter().find(|n| !seen.insert(n.id)) {
            return Err(StorageError::DuplicateId(duplicate.id))
        }
        for note in &notes {
            rules.validate(&NoteDraft::from(note))
                .map_err(|errors| StorageError::InvalidStoredNote {
                    id: note.id,
                    errors,
                })?;
        }
        debug!("note store opened with {} notes", notes.len());
        Ok(NoteStoreImpl {
            io,
            rules,
            notes: Mutex::new(notes),
        })
    }

    pub async fn create(&self, draft: NoteDraft) -> Result<Note, StorageError> {
        self.rules.validate(&draft)?;
        let mut notes = self.notes.lock().await;
        let note = Note {
            id: self.fresh_id(&notes),
            title: draft.title,
            description: draft.description,
            created_at: self.io.now(),
            updated_at: None,
        };
        debug!("creating note {}", note.id);
        trace!("new note {}: {note:?}", note.id);
        notes.push(note.clone());
        if let Err(e) = self.io.save(&notes).await {
            error!("failed to store new note {}: {e}", note.id);
            notes.pop();
            return Err(e)
        }
        Ok(note)
    }

    pub async fn list(&self) -> Vec<Note> {
        let notes = self.notes.lock().await;
        trace!("listing {} notes", notes.len());
        notes.clone()
    }

    pub async fn count(&self) -> usize {
        self.notes.lock().await.len()
    }

    pub async fn get(&self, id: NoteId) -> Result<Note, StorageError> {
        trace!("reading note {id}");
        self.notes.lock().await
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or(StorageError::NoteNotFound)
    }

    /// An unknown id wins over an invalid draft.
    pub async fn update(
        &self,
        id: NoteId,
        draft: NoteDraft,
    ) -> Result<Note, StorageError> {
        let mut notes = self.notes.lock().await;
        let index = position(&notes, id)?;
        self.rules.validate(&draft)?;
        debug!("updating note {id}");
        let current = &notes[index];
        let updated = Note {
            title: draft.title,
            description: draft.description,
            updated_at: Some(self.io.now().max(current.created_at)),
            ..current.clone()
        };
        let previous = std::mem::replace(&mut notes[index], updated.clone());
        if let Err(e) = self.io.save(&notes).await {
            error!("failed to store updated note {id}: {e}");
            notes[index] = previous;
            return Err(e)
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: NoteId) -> Result<(), StorageError> {
        let mut notes = self.notes.lock().await;
        let index = position(&notes, id)?;
        debug!("deleting note {id}");
        let removed = notes.remove(index);
        if let Err(e) = self.io.save(&notes).await {
            error!("failed to store deletion of note {id}: {e}");
            notes.insert(index, removed);
            return Err(e)
        }
        Ok(())
    }

    fn fresh_id(&self, notes: &[Note]) -> NoteId {
        loop {
            let id = self.io.generate_id();
            if notes.iter().all(|n| n.id != id) {
                return id
            }
            warn!("generated note id {id} is already taken, retrying");
        }
    }
}

fn position(notes: &[Note], id: NoteId) -> Result<usize, StorageError> {
    notes.iter()
        .position(|n| n.id == id)
        .ok_or(StorageError::NoteNotFound)
}
