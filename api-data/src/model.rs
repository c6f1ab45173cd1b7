use data::validation::{FieldError, NoteField, ValidationErrors};
use data::{Note, NoteDraft};
use serde::{Deserialize, Serialize};

/// Body of create and update requests. Missing fields count as empty.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct NoteWriteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<NoteWriteRequest> for NoteDraft {
    fn from(value: NoteWriteRequest) -> Self {
        NoteDraft {
            title: value.title.unwrap_or_default(),
            description: value.description.unwrap_or_default(),
        }
    }
}

impl From<&NoteDraft> for NoteWriteRequest {
    fn from(value: &NoteDraft) -> Self {
        NoteWriteRequest {
            title: Some(value.title.clone()),
            description: Some(value.description.clone()),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        DataResponse {
            success: true,
            data,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Note>,
}

impl ListResponse {
    pub fn new(notes: Vec<Note>) -> Self {
        ListResponse {
            success: true,
            count: notes.len(),
            data: notes,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorResponse {
            success: false,
            error: error.into(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ValidationErrorResponse {
    pub success: bool,
    pub errors: Vec<FieldErrorData>,
}

impl From<&ValidationErrors> for ValidationErrorResponse {
    fn from(value: &ValidationErrors) -> Self {
        ValidationErrorResponse {
            success: false,
            errors: value.errors()
                .iter()
                .map(FieldErrorData::from)
                .collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldErrorType {
    Field,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldErrorLocation {
    Body,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FieldErrorData {
    #[serde(rename = "type")]
    pub error_type: FieldErrorType,
    pub value: String,
    pub msg: String,
    pub path: NoteField,
    pub location: FieldErrorLocation,
}

impl From<&FieldError> for FieldErrorData {
    fn from(value: &FieldError) -> Self {
        FieldErrorData {
            error_type: FieldErrorType::Field,
            value: value.value.clone(),
            msg: value.message(),
            path: value.field,
            location: FieldErrorLocation::Body,
        }
    }
}

/// Any response envelope, as read back by a client.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ResponseEnvelope<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldErrorData>,
}

impl<T> ResponseEnvelope<T> {
    pub fn failure_message(&self) -> Option<String> {
        if let Some(ref error) = self.error {
            return Some(error.clone())
        }
        Some(
            self.errors
                .iter()
                .map(|e| e.msg.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        )
            .filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use data::validation::{ValidationRules, DESCRIPTION_MAX_LEN, TITLE_MAX_LEN};
    use test_utils::assert_json_eq;
    use time::macros::datetime;
    use uuid::Uuid;
    use super::*;

    fn note() -> Note {
        Note {
            id: Uuid::from_u128(1).into(),
            title: "Groceries".into(),
            description: "Milk, eggs".into(),
            created_at: datetime!(2024-05-01 10:00:00 UTC),
            updated_at: None,
        }
    }

    #[test]
    fn list_response_counts_notes() {
        assert_json_eq!(
            ListResponse::new(vec![note()]),
            r#"{
                "success": true,
                "count": 1,
                "data": [{
                    "id": "00000000-0000-0000-0000-000000000001",
                    "title": "Groceries",
                    "description": "Milk, eggs",
                    "createdAt": "2024-05-01T10:00:00Z"
                }]
            }"#,
        );
    }

    #[test]
    fn deletion_response_has_null_data() {
        assert_json_eq!(DataResponse::new(()), r#"{"success": true, "data": null}"#);
    }

    #[test]
    fn validation_errors_use_field_entries() {
        let errors = ValidationRules::server(TITLE_MAX_LEN, DESCRIPTION_MAX_LEN)
            .validate(&NoteDraft::new("", "x"))
            .expect_err("empty title");
        assert_json_eq!(
            ValidationErrorResponse::from(&errors),
            r#"{
                "success": false,
                "errors": [{
                    "type": "field",
                    "value": "",
                    "msg": "Title is required",
                    "path": "title",
                    "location": "body"
                }]
            }"#,
        );
    }

    #[test]
    fn write_request_missing_fields_become_empty() {
        let request: NoteWriteRequest = serde_json::from_str(r#"{"title": "a"}"#).unwrap();
        assert_eq!(NoteDraft::from(request), NoteDraft::new("a", ""));
    }

    #[test]
    fn envelope_reads_every_response_kind() {
        let deleted: ResponseEnvelope<()> =
            serde_json::from_str(r#"{"success": true, "data": null}"#).unwrap();
        assert!(deleted.success);
        assert_eq!(deleted.failure_message(), None);

        let not_found: ResponseEnvelope<Note> =
            serde_json::from_str(r#"{"success": false, "error": "Note not found"}"#).unwrap();
        assert_eq!(not_found.data, None);
        assert_eq!(not_found.failure_message().as_deref(), Some("Note not found"));

        let invalid: ResponseEnvelope<Note> = serde_json::from_str(
            r#"{"success": false, "errors": [
                {"type": "field", "value": "", "msg": "Title is required", "path": "title", "location": "body"},
                {"type": "field", "value": "", "msg": "Description is required", "path": "description", "location": "body"}
            ]}"#,
        ).unwrap();
        assert_eq!(
            invalid.failure_message().as_deref(),
            Some("Title is required; Description is required"),
        );
    }
}
