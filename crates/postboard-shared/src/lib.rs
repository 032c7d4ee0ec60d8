//! # Postboard Shared
//!
//! Wire types shared between the API server and its clients.

pub mod dto;
pub mod response;

pub use dto::{CreatePostRequest, FieldValue, HealthResponse, PostResponse, UpdatePostRequest};
pub use response::{ErrorResponse, ListEnvelope};
