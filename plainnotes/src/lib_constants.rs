use data::validation::{DESCRIPTION_MAX_LEN, TITLE_MAX_LEN};

pub const DEFAULT_MAX_TITLE_LEN: usize = TITLE_MAX_LEN;
pub const DEFAULT_MAX_DESCRIPTION_LEN: usize = DESCRIPTION_MAX_LEN;
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:3000";

// the tmp file lives next to the notes file so the rename stays atomic
pub const TMP_FILENAME_INFIX: &str = ".tmp.";
