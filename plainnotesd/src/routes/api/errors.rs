use api_data::model::{ErrorResponse, ValidationErrorResponse};
use data::validation::ValidationErrors;
use log::error;
use plainnotes::storage::StorageError;
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::Request;
use thiserror::Error;
use crate::app_constants::{NOTE_NOT_FOUND_MESSAGE, SERVER_ERROR_MESSAGE};
use crate::routes::api::json::JsonRequestError;

/// Everything a note handler can fail with, rendered as the
/// `{success: false, ...}` envelope
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("note not found")]
    NotFound,

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Request(#[from] JsonRequestError),

    #[error("storage failure: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for ApiError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::NoteNotFound => ApiError::NotFound,
            StorageError::Validation(errors) => ApiError::Validation(errors),
            e => ApiError::Storage(e),
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        match self {
            ApiError::NotFound => (
                Status::NotFound,
                Json(ErrorResponse::new(NOTE_NOT_FOUND_MESSAGE)),
            ).respond_to(request),

            ApiError::Validation(errors) => (
                Status::BadRequest,
                Json(ValidationErrorResponse::from(&errors)),
            ).respond_to(request),

            ApiError::Request(e) => (
                e.status(),
                Json(ErrorResponse::new(e.to_string())),
            ).respond_to(request),

            ApiError::Storage(e) => {
                error!("{} {} failed: {e}", request.method(), request.uri());
                (
                    Status::InternalServerError,
                    Json(ErrorResponse::new(SERVER_ERROR_MESSAGE)),
                ).respond_to(request)
            },
        }
    }
}
