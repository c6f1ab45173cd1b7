pub const API_PREFIX: &str = "/api";

// used when the rocket config has no "json" limit
pub const DEFAULT_JSON_READ_LIMIT: u64 = 100 * 1024;

pub const NOTE_NOT_FOUND_MESSAGE: &str = "Note not found";
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Not found";
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

pub const CORS_ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE";
pub const CORS_ALLOWED_HEADERS: &str = "Content-Type, Authorization";
