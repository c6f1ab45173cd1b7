pub mod api;
pub mod constants;
pub mod errors;
pub mod view;

pub use api::{HttpNotesApi, NotesApi};
pub use errors::ClientError;
pub use view::{ComposeDialog, NoteForm, NotesView, SubmitOutcome};
