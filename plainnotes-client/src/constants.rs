use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5025/api";

/// How long an error banner stays up
pub const ERROR_DISMISS_DELAY: Duration = Duration::from_secs(3);

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch notes";
pub const FETCH_ERROR_MESSAGE: &str = "An error occurred while fetching notes";
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create note";
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update note";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete note";
