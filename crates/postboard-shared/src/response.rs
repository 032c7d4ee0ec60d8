//! Standardized API response types (RFC 7807 compliant for errors).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A collection body in either of the shapes seen on the wire:
/// a bare JSON array, or an object carrying the array under `data`.
///
/// The post API itself answers with the bare shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListEnvelope<T> {
    /// The items, whichever shape carried them.
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(items) | ListEnvelope::Wrapped { data: items } => items,
        }
    }
}

/// RFC 7807 Problem Details for HTTP APIs.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,

    /// A human-readable explanation specific to this occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Field-level validation messages (extension member, 422 only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
            errors: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_errors(mut self, errors: BTreeMap<String, Vec<String>>) -> Self {
        self.errors = Some(errors);
        self
    }

    // Common error constructors
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_detail(detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "Not Found").with_detail(detail)
    }

    pub fn unprocessable(errors: BTreeMap<String, Vec<String>>) -> Self {
        let detail = errors
            .values()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");
        Self::new(422, "Validation Failed")
            .with_detail(detail)
            .with_errors(errors)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }

    /// Every field message, in field order.
    pub fn field_messages(&self) -> Vec<&str> {
        self.errors
            .iter()
            .flat_map(|fields| fields.values())
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_envelope_reads_both_shapes() {
        let bare: ListEnvelope<u32> = serde_json::from_str("[1, 2]").unwrap();
        let wrapped: ListEnvelope<u32> = serde_json::from_str(r#"{"data": [1, 2]}"#).unwrap();

        assert_eq!(bare.into_items(), vec![1, 2]);
        assert_eq!(wrapped.into_items(), vec![1, 2]);
    }

    #[test]
    fn list_envelope_rejects_objects_without_data() {
        assert!(serde_json::from_str::<ListEnvelope<u32>>(r#"{"items": [1]}"#).is_err());
    }

    #[test]
    fn unprocessable_carries_field_errors() {
        let mut errors = BTreeMap::new();
        errors.insert(
            "title".to_string(),
            vec!["The title field is required.".to_string()],
        );
        let response = ErrorResponse::unprocessable(errors);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], 422);
        assert_eq!(json["errors"]["title"][0], "The title field is required.");
        assert_eq!(response.field_messages(), vec!["The title field is required."]);
    }
}
