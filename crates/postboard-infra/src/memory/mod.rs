//! In-memory post repository - used when no database is configured.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use postboard_core::domain::{NewPost, Post, PostPatch};
use postboard_core::error::RepoError;
use postboard_core::ports::PostRepository;

#[derive(Default)]
struct Store {
    last_id: i64,
    posts: Vec<Post>,
}

/// In-memory post store using a Vec behind an async RwLock.
///
/// Ids are assigned from a monotonically increasing counter and never reused.
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        let mut posts = store.posts.clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(posts)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        store.last_id += 1;

        let now = Utc::now();
        let post = Post {
            id: store.last_id,
            title: new_post.title,
            body: new_post.body,
            created_at: now,
            updated_at: now,
        };
        store.posts.push(post.clone());

        Ok(post)
    }

    async fn update(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, RepoError> {
        let mut store = self.store.write().await;
        let Some(post) = store.posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        post.apply(patch, Utc::now());
        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let before = store.posts.len();
        store.posts.retain(|p| p.id != id);

        if store.posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postboard_core::domain::FieldInput;

    async fn create(repo: &InMemoryPostRepository, title: &str) -> Post {
        let new_post = NewPost::parse(FieldInput::Text(title), FieldInput::Absent).unwrap();
        repo.create(new_post).await.unwrap()
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let repo = InMemoryPostRepository::new();
        let a = create(&repo, "A").await;
        repo.delete(a.id).await.unwrap();
        let b = create(&repo, "B").await;

        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = InMemoryPostRepository::new();
        for title in ["A", "B", "C"] {
            create(&repo, title).await;
        }

        let titles: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["C", "B", "A"]);
    }

    #[tokio::test]
    async fn test_update_then_find_agree() {
        let repo = InMemoryPostRepository::new();
        let post = create(&repo, "A").await;

        let patch = PostPatch::parse(FieldInput::Absent, FieldInput::Text("body")).unwrap();
        let updated = repo.update(post.id, patch).await.unwrap().unwrap();

        assert_eq!(updated.title, "A");
        assert_eq!(repo.find_by_id(post.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_empty_update_keeps_updated_at() {
        let repo = InMemoryPostRepository::new();
        let post = create(&repo, "A").await;

        let unchanged = repo.update(post.id, PostPatch::default()).await.unwrap();

        assert_eq!(unchanged, Some(post));
    }

    #[tokio::test]
    async fn test_delete_then_find_is_none() {
        let repo = InMemoryPostRepository::new();
        let post = create(&repo, "A").await;

        repo.delete(post.id).await.unwrap();

        assert_eq!(repo.find_by_id(post.id).await.unwrap(), None);
        assert!(matches!(repo.delete(post.id).await, Err(RepoError::NotFound)));
    }
}
