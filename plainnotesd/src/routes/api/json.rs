use async_trait::async_trait;
use rocket::data::{FromData, Outcome, ToByteUnit};
use rocket::http::Status;
use rocket::{Data, Request};
use serde::de::DeserializeOwned;
use thiserror::Error;
use crate::app_constants::DEFAULT_JSON_READ_LIMIT;

/// A JSON object request body.
///
/// An empty or whitespace-only body reads as `{}`, so missing payloads end
/// up as field errors instead of parse errors.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[derive(Debug, Error)]
pub enum JsonRequestError {
    #[error("invalid JSON body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("request body too large")]
    TooLarge,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl JsonRequestError {
    pub fn status(&self) -> Status {
        match self {
            JsonRequestError::TooLarge => Status::PayloadTooLarge,
            _ => Status::BadRequest,
        }
    }
}

#[async_trait]
impl<'r, T: DeserializeOwned + Send> FromData<'r> for JsonBody<T> {
    type Error = JsonRequestError;

    async fn from_data(
        req: &'r Request<'_>,
        data: Data<'r>,
    ) -> Outcome<'r, Self> {
        let limit = req.limits()
            .get("json")
            .unwrap_or(DEFAULT_JSON_READ_LIMIT.bytes());
        match data.open(limit).into_bytes().await {
            Ok(bytes) if bytes.is_complete() => match parse_object(&bytes) {
                Ok(value) => Outcome::Success(JsonBody(value)),
                Err(e) => Outcome::Error((e.status(), e)),
            },
            Ok(_) => Outcome::Error((Status::PayloadTooLarge, JsonRequestError::TooLarge)),
            Err(e) => Outcome::Error((Status::BadRequest, e.into())),
        }
    }
}

fn parse_object<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, JsonRequestError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_str("{}")?)
    }
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    if !value.is_object() {
        return Err(JsonRequestError::NotAnObject)
    }
    Ok(serde_json::from_value(value)?)
}
