//! # Postboard Client
//!
//! Talks to the post API over HTTP and keeps a local, advisory copy of the
//! post list in sync with the server's answers.
//!
//! ```ignore
//! let api = HttpPostsApi::new(ClientConfig::from_env())?;
//! let store = PostListStore::new(Arc::new(api));
//! store.mount().await;
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod normalize;
pub mod store;

pub use api::{HttpPostsApi, PostsApi};
pub use config::ClientConfig;
pub use error::ClientError;
pub use normalize::normalize_post_list;
pub use store::{PostListState, PostListStore};
