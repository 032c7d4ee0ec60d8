use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;

/// Longest title accepted, counted in characters.
pub const TITLE_MAX_CHARS: usize = 255;

const TITLE_REQUIRED: &str = "The title field is required.";
const TITLE_NOT_STRING: &str = "The title field must be a string.";
const BODY_NOT_STRING: &str = "The body field must be a string.";

/// Post entity - a blog post as stored by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Apply a validated patch, touching `updated_at`.
    ///
    /// An empty patch changes nothing, not even the timestamp.
    pub fn apply(&mut self, patch: PostPatch, now: DateTime<Utc>) {
        if patch.is_empty() {
            return;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(body) = patch.body {
            self.body = body;
        }
        self.updated_at = now;
    }
}

/// One field of a request body, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput<'a> {
    /// The key was not sent.
    Absent,
    /// Sent as JSON `null`.
    Null,
    Text(&'a str),
    /// Sent, but not as a string.
    NotText,
}

/// Validated input for creating a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub body: Option<String>,
}

impl NewPost {
    /// Validate raw create input.
    ///
    /// The title is trimmed and must be non-empty and at most
    /// [`TITLE_MAX_CHARS`] characters. A blank body is stored as `None`.
    pub fn parse(title: FieldInput<'_>, body: FieldInput<'_>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = match title {
            FieldInput::Absent | FieldInput::Null => {
                errors.add("title", TITLE_REQUIRED);
                None
            }
            FieldInput::NotText => {
                errors.add("title", TITLE_NOT_STRING);
                None
            }
            FieldInput::Text(raw) => check_title(raw, TITLE_REQUIRED, &mut errors),
        };
        let body = parse_body(body, &mut errors).flatten();

        errors.into_result(Self {
            title: title.unwrap_or_default(),
            body,
        })
    }
}

/// Validated partial update. `None` means "leave unchanged".
///
/// `body: Some(None)` clears the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub body: Option<Option<String>>,
}

impl PostPatch {
    /// Validate raw update input.
    ///
    /// A supplied title follows the create rules, except that `null`, a
    /// non-string or a blank string all count as "not a string": a blank
    /// title reads as `null` once trimmed.
    pub fn parse(title: FieldInput<'_>, body: FieldInput<'_>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = match title {
            FieldInput::Absent => None,
            FieldInput::Null | FieldInput::NotText => {
                errors.add("title", TITLE_NOT_STRING);
                None
            }
            FieldInput::Text(raw) => check_title(raw, TITLE_NOT_STRING, &mut errors),
        };
        let body = parse_body(body, &mut errors);

        errors.into_result(Self { title, body })
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none()
    }
}

fn check_title(raw: &str, blank: &str, errors: &mut ValidationErrors) -> Option<String> {
    let title = raw.trim();

    if title.is_empty() {
        errors.add("title", blank);
        return None;
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        errors.add(
            "title",
            format!("The title field must not be greater than {TITLE_MAX_CHARS} characters."),
        );
        return None;
    }

    Some(title.to_string())
}

/// `None` when the body was not supplied; `Some(None)` clears it.
fn parse_body(input: FieldInput<'_>, errors: &mut ValidationErrors) -> Option<Option<String>> {
    match input {
        FieldInput::Absent => None,
        FieldInput::Null => Some(None),
        FieldInput::Text(raw) => {
            let body = raw.trim();
            Some((!body.is_empty()).then(|| body.to_string()))
        }
        FieldInput::NotText => {
            errors.add("body", BODY_NOT_STRING);
            None
        }
    }
}
