use std::fmt::{Display, Formatter};
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct NoteId(Uuid);

impl NoteId {
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for NoteId {
    fn from(value: Uuid) -> Self {
        NoteId(value)
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0.hyphenated(), f)
    }
}

#[derive(Debug, Error)]
pub enum NoteIdParseError {
    #[error("invalid note id: {0}")]
    Uuid(#[from] uuid::Error),

    #[error("note id {0} is not in lower-case hyphenated form")]
    NotCanonical(String),
}

/// Only the lower-case hyphenated form names a note, so every id has
/// exactly one spelling.
impl FromStr for NoteId {
    type Err = NoteIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::try_parse(s)?;
        let mut buf = Uuid::encode_buffer();
        if uuid.hyphenated().encode_lower(&mut buf) != s {
            return Err(NoteIdParseError::NotCanonical(s.to_owned()))
        }
        Ok(NoteId(uuid))
    }
}

/// A stored note.
///
/// Timestamps go over the wire as RFC 3339 strings; `updatedAt` is left
/// out until the note is edited for the first time.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub description: String,

    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option",
    )]
    pub updated_at: Option<OffsetDateTime>,
}

/// User supplied part of a note, not validated yet
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NoteDraft {
    pub title: String,
    pub description: String,
}

impl NoteDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        NoteDraft {
            title: title.into(),
            description: description.into(),
        }
    }
}

impl From<&Note> for NoteDraft {
    fn from(value: &Note) -> Self {
        NoteDraft {
            title: value.title.clone(),
            description: value.description.clone(),
        }
    }
}
