//! PostgreSQL repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DbConn, DbErr, EntityTrait, IntoActiveModel,
    QueryOrder, Set,
};

use postboard_core::domain::{NewPost, Post, PostPatch};
use postboard_core::error::RepoError;
use postboard_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Give the connection back, e.g. to read a mock's transaction log.
    #[cfg(test)]
    pub(crate) fn into_connection(self) -> DbConn {
        self.db
    }

    async fn fetch(&self, id: i64) -> Result<Option<post::Model>, RepoError> {
        PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_error)
    }
}

fn query_error(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        DbErr::RecordNotFound(_) => RepoError::NotFound,
        other => {
            let err_str = other.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint(err_str)
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let rows = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.fetch(id).await?.map(Into::into))
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let now = chrono::Utc::now();
        let model = post::ActiveModel {
            id: NotSet,
            title: Set(new_post.title),
            body: Set(new_post.body),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await
        .map_err(query_error)?;

        tracing::debug!(post_id = model.id, "Post created");
        Ok(model.into())
    }

    async fn update(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, RepoError> {
        let Some(existing) = self.fetch(id).await? else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(existing.into()));
        }

        let mut active = existing.into_active_model();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(body) = patch.body {
            active.body = Set(body);
        }
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&self.db).await.map_err(query_error)?;

        // Answer with what a subsequent read would see, not the in-memory model.
        let fresh = self.fetch(id).await?;
        tracing::debug!(post_id = id, found = fresh.is_some(), "Post updated");
        Ok(fresh.map(Into::into))
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        tracing::debug!(post_id = id, "Post deleted");
        Ok(())
    }
}
