use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostPatch};
use crate::error::RepoError;

/// Post repository - the single owner of post persistence.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, newest first (`created_at` desc, then `id` desc).
    async fn list(&self) -> Result<Vec<Post>, RepoError>;

    /// Find a post by its id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError>;

    /// Persist a new post and return the stored row.
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError>;

    /// Apply a patch and return the post as re-read from storage.
    ///
    /// Returns `Ok(None)` when no post has that id.
    async fn update(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, RepoError>;

    /// Hard-delete a post. Fails with [`RepoError::NotFound`] for unknown ids.
    async fn delete(&self, id: i64) -> Result<(), RepoError>;
}
