use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use async_trait::async_trait;
use data::{Note, NoteId};
use log::{debug, error, trace};
use time::OffsetDateTime;
use tokio::{fs, io};
use crate::config::app_config::StorageConfig;
use crate::lib_constants::TMP_FILENAME_INFIX;
use crate::rng::{random_note_id, random_uuid};
use crate::storage::StorageError;

/// Backing medium of the note store.
///
/// `save` always gets the complete list and replaces whatever was stored
/// before it. Id and clock sources live here too, so the store itself
/// stays deterministic under test.
#[async_trait]
pub trait NoteStorageIo: Send + Sync {
    async fn load(&self) -> Result<Vec<Note>, StorageError>;

    async fn save(&self, notes: &[Note]) -> Result<(), StorageError>;

    fn generate_id(&self) -> NoteId;

    fn now(&self) -> OffsetDateTime;
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProductionNoteStorageIo {
    Memory,
    File {
        path: PathBuf,
    },
}

impl From<&StorageConfig> for ProductionNoteStorageIo {
    fn from(value: &StorageConfig) -> Self {
        match value {
            StorageConfig::Memory => ProductionNoteStorageIo::Memory,
            StorageConfig::File { path } => ProductionNoteStorageIo::File {
                path: path.clone(),
            },
        }
    }
}

#[async_trait]
impl NoteStorageIo for ProductionNoteStorageIo {
    async fn load(&self) -> Result<Vec<Note>, StorageError> {
        match self {
            ProductionNoteStorageIo::Memory => Ok(Vec::new()),
            ProductionNoteStorageIo::File { path } => read_notes_file(path).await,
        }
    }

    async fn save(&self, notes: &[Note]) -> Result<(), StorageError> {
        match self {
            ProductionNoteStorageIo::Memory => Ok(()),
            ProductionNoteStorageIo::File { path } => write_notes_file(path, notes).await,
        }
    }

    fn generate_id(&self) -> NoteId {
        random_note_id()
    }

    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

async fn read_notes_file(path: &Path) -> Result<Vec<Note>, StorageError> {
    debug!("reading notes from \"{}\"", path.display());
    match fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("no notes file at \"{}\" yet, starting empty", path.display());
            Ok(Vec::new())
        },
        Err(e) => Err(e.into()),
    }
}

async fn write_notes_file(path: &Path, notes: &[Note]) -> Result<(), StorageError> {
    let serialized = serde_json::to_vec_pretty(notes)?;
    let tmp_path = tmp_path_for(path);
    trace!(
        "writing {} notes to tmp file \"{}\"",
        notes.len(),
        tmp_path.display(),
    );
    let result = match fs::write(&tmp_path, serialized).await {
        Ok(()) => fs::rename(&tmp_path, path).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        error!(
            "failed to replace notes file \"{}\": {e}",
            path.display(),
        );
        if let Err(e) = fs::remove_file(&tmp_path).await
            && e.kind() != io::ErrorKind::NotFound
        {
            error!(
                "failed to remove tmp file \"{}\": {e}",
                tmp_path.display(),
            );
        }
        return Err(e.into())
    }
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name()
        .map(OsStr::to_os_string)
        .unwrap_or_default();
    name.push(TMP_FILENAME_INFIX);
    name.push(random_uuid(&mut rand::rng()).hyphenated().to_string());
    path.with_file_name(name)
}
