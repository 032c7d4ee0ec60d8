//! Tolerant decoding of post-list bodies.
//!
//! The list endpoint answers with a bare array, but some deployments wrap it
//! as `{"data": [...]}`. Both decode to the same list.

use postboard_shared::{ListEnvelope, PostResponse};
use serde_json::Value;

use crate::error::ClientError;

/// Decode a list body in either shape.
pub fn normalize_post_list(body: Value) -> Result<Vec<PostResponse>, ClientError> {
    let recognized = match &body {
        Value::Array(_) => true,
        Value::Object(map) => map.get("data").is_some_and(Value::is_array),
        _ => false,
    };
    if !recognized {
        return Err(ClientError::UnexpectedShape(shape_of(&body).to_string()));
    }

    serde_json::from_value::<ListEnvelope<PostResponse>>(body)
        .map(ListEnvelope::into_items)
        .map_err(|e| ClientError::Decode(e.to_string()))
}

fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object without a data array",
    }
}
