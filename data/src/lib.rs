mod note;
pub mod validation;

pub use note::{Note, NoteDraft, NoteId, NoteIdParseError};
