//! Client-side error types.

use postboard_shared::ErrorResponse;
use thiserror::Error;

/// Failures observed while talking to the post API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the input (422).
    #[error("Validation failed: {}", .0.detail.as_deref().unwrap_or("invalid input"))]
    Validation(ErrorResponse),

    #[error("Resource not found")]
    NotFound,

    /// The request never produced a response (connection refused, timeout, ...).
    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Text suitable for showing to a person.
    ///
    /// Network failures get a generic message; validation failures list the
    /// server's field messages.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(problem) => {
                let messages = problem.field_messages();
                if messages.is_empty() {
                    problem
                        .detail
                        .clone()
                        .unwrap_or_else(|| "The post could not be saved.".to_string())
                } else {
                    messages.join(" ")
                }
            }
            ClientError::NotFound => "That post no longer exists.".to_string(),
            ClientError::Transport(_) => {
                "Could not reach the API. Please try again.".to_string()
            }
            ClientError::Status { status, .. } => {
                format!("The API answered with an error (status {status}).")
            }
            ClientError::UnexpectedShape(_) | ClientError::Decode(_) => {
                "The API returned an unexpected response.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err)
        }
    }
}
