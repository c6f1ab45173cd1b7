mod errors;
mod internal;

pub use errors::StorageError;
pub use internal::{NoteStore, NoteStoreImpl};
pub use internal::io_trait::{NoteStorageIo, ProductionNoteStorageIo};
