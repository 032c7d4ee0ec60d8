//! Domain entities - the core business objects.

mod post;

pub use post::{FieldInput, NewPost, Post, PostPatch, TITLE_MAX_CHARS};
