//! Local post-list state, synchronized with the API.
//!
//! Every change is applied only after the server confirms it: a created post
//! is prepended using the server's returned copy, and a removal is applied
//! once the delete succeeds. Failures never escape; they become a readable
//! `last_error` and the busy flags are always reset.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use postboard_shared::{CreatePostRequest, PostResponse};
use tokio::sync::RwLock;

use crate::api::PostsApi;

/// What a view renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostListState {
    /// Posts in server order, newest first.
    pub posts: Vec<PostResponse>,
    pub loading: bool,
    pub pending_submission: bool,
    pub last_error: Option<String>,
    pub draft_title: String,
    pub draft_body: String,
}

/// Post list bound to an API client.
///
/// The cached list is advisory: other clients may change the server's copy
/// at any time.
pub struct PostListStore {
    api: Arc<dyn PostsApi>,
    state: RwLock<PostListState>,
    mounted: AtomicBool,
}

impl PostListStore {
    pub fn new(api: Arc<dyn PostsApi>) -> Self {
        Self {
            api,
            state: RwLock::new(PostListState::default()),
            mounted: AtomicBool::new(false),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Current state, cloned for rendering.
    pub async fn snapshot(&self) -> PostListState {
        self.state.read().await.clone()
    }

    /// Apply `update` unless the view has been torn down.
    ///
    /// The flag is read under the write lock, so an `unmount` that lands
    /// while waiting for the lock still wins.
    async fn commit(&self, update: impl FnOnce(&mut PostListState)) {
        let mut state = self.state.write().await;
        if !self.is_mounted() {
            tracing::debug!("Dropping post list update after unmount");
            return;
        }
        update(&mut state);
    }

    /// Mark the view live and load the list.
    ///
    /// On failure the previous list is kept and `last_error` is set.
    pub async fn mount(&self) {
        self.mounted.store(true, Ordering::SeqCst);
        self.commit(|state| {
            state.loading = true;
            state.last_error = None;
        })
        .await;

        let result = self.api.list().await;

        self.commit(|state| {
            match result {
                Ok(posts) => state.posts = posts,
                Err(err) => {
                    tracing::warn!(error = %err, "Failed to load posts");
                    state.last_error = Some(err.user_message());
                }
            }
            state.loading = false;
        })
        .await;
    }

    /// Tear the view down. Responses still in flight are discarded.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    pub async fn set_draft_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.commit(|state| state.draft_title = title).await;
    }

    pub async fn set_draft_body(&self, body: impl Into<String>) {
        let body = body.into();
        self.commit(|state| state.draft_body = body).await;
    }

    /// Whether the submit control should be enabled.
    pub async fn can_submit(&self) -> bool {
        let state = self.state.read().await;
        !state.pending_submission && !state.draft_title.trim().is_empty()
    }

    /// Submit the draft as a new post.
    ///
    /// Does nothing, and makes no request, while the trimmed title is empty or
    /// another submission is pending.
    pub async fn add(&self) {
        if !self.is_mounted() {
            return;
        }

        let request = {
            let mut state = self.state.write().await;
            let title = state.draft_title.trim().to_string();
            if title.is_empty() || state.pending_submission {
                return;
            }

            let body = state.draft_body.trim().to_string();
            state.pending_submission = true;
            state.last_error = None;

            CreatePostRequest::new(title, (!body.is_empty()).then_some(body))
        };

        let result = self.api.create(&request).await;

        self.commit(|state| {
            match result {
                Ok(post) => {
                    state.posts.insert(0, post);
                    state.draft_title.clear();
                    state.draft_body.clear();
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Failed to create post");
                    state.last_error = Some(err.user_message());
                }
            }
            state.pending_submission = false;
        })
        .await;
    }

    /// Delete a post, dropping it locally once the server confirms.
    pub async fn remove(&self, id: i64) {
        if !self.is_mounted() {
            return;
        }
        self.commit(|state| state.last_error = None).await;

        let result = self.api.destroy(id).await;

        self.commit(|state| match result {
            Ok(()) => state.posts.retain(|post| post.id != id),
            Err(err) => {
                tracing::warn!(error = %err, post_id = id, "Failed to delete post");
                state.last_error = Some(err.user_message());
            }
        })
        .await;
    }
}
