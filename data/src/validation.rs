//! Field rules shared by the server and the client.
//!
//! Both tiers build their checks from [`ValidationRules`]: the server only
//! insists on presence and the upper bounds, the client additionally
//! enforces the minimum lengths before anything is sent.

use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::NoteDraft;

pub const TITLE_MIN_LEN: usize = 3;
pub const TITLE_MAX_LEN: usize = 100;
pub const DESCRIPTION_MIN_LEN: usize = 1;
pub const DESCRIPTION_MAX_LEN: usize = 1000;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteField {
    Title,
    Description,
}

impl NoteField {
    pub const ALL: [NoteField; 2] = [NoteField::Title, NoteField::Description];

    pub fn name(self) -> &'static str {
        match self {
            NoteField::Title => "title",
            NoteField::Description => "description",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NoteField::Title => "Title",
            NoteField::Description => "Description",
        }
    }

    pub fn value_of(self, draft: &NoteDraft) -> &str {
        match self {
            NoteField::Title => &draft.title,
            NoteField::Description => &draft.description,
        }
    }
}

impl Display for NoteField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FieldRules {
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ValidationRules {
    pub title: FieldRules,
    pub description: FieldRules,
}

impl ValidationRules {
    pub const fn server(max_title_len: usize, max_description_len: usize) -> Self {
        ValidationRules {
            title: FieldRules {
                min_len: None,
                max_len: Some(max_title_len),
            },
            description: FieldRules {
                min_len: None,
                max_len: Some(max_description_len),
            },
        }
    }

    pub const fn client() -> Self {
        ValidationRules {
            title: FieldRules {
                min_len: Some(TITLE_MIN_LEN),
                max_len: Some(TITLE_MAX_LEN),
            },
            description: FieldRules {
                min_len: Some(DESCRIPTION_MIN_LEN),
                max_len: Some(DESCRIPTION_MAX_LEN),
            },
        }
    }

    pub fn for_field(&self, field: NoteField) -> &FieldRules {
        match field {
            NoteField::Title => &self.title,
            NoteField::Description => &self.description,
        }
    }

    /// Checks a single value. Blank values only ever report
    /// [`Violation::Required`]; minimums count the trimmed value,
    /// maximums the value as it would be stored.
    pub fn check_field(&self, field: NoteField, value: &str) -> Option<Violation> {
        let rules = self.for_field(field);
        let trimmed_len = value.trim().chars().count();
        if trimmed_len == 0 {
            return Some(Violation::Required)
        }
        if let Some(min_len) = rules.min_len
            && trimmed_len < min_len
        {
            return Some(Violation::TooShort(min_len))
        }
        if let Some(max_len) = rules.max_len
            && value.chars().count() > max_len
        {
            return Some(Violation::TooLong(max_len))
        }
        None
    }

    pub fn validate(&self, draft: &NoteDraft) -> Result<(), ValidationErrors> {
        let errors: Vec<_> = NoteField::ALL
            .into_iter()
            .filter_map(|field| {
                let value = field.value_of(draft);
                self.check_field(field, value)
                    .map(|violation| FieldError {
                        field,
                        violation,
                        value: value.to_owned(),
                    })
            })
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Violation {
    Required,
    TooShort(usize),
    TooLong(usize),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldError {
    pub field: NoteField,
    pub violation: Violation,
    pub value: String,
}

impl FieldError {
    pub fn message(&self) -> String {
        message(self.field, self.violation)
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

pub fn message(field: NoteField, violation: Violation) -> String {
    let label = field.label();
    match violation {
        Violation::Required => format!("{label} is required"),
        Violation::TooShort(len) => format!("{label} must be at least {len} characters"),
        Violation::TooLong(len) => format!("{label} must be at most {len} characters"),
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid note: {}", self.messages().join(", "))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn get(&self, field: NoteField) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(FieldError::message).collect()
    }
}
