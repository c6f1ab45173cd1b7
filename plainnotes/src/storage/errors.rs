use data::NoteId;
use data::validation::ValidationErrors;
use thiserror::Error;
use tokio::io::Error as IoError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("note not found")]
    NoteNotFound,

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Io(#[from] IoError),

    #[error("cannot serialize or parse the notes file: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("duplicate note id {0} in the stored notes")]
    DuplicateId(NoteId),

    #[error("stored note {id} is invalid: {errors}")]
    InvalidStoredNote {
        id: NoteId,
        errors: ValidationErrors,
    },
}
