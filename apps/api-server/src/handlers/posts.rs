//! Post resource handlers.

use actix_web::{HttpResponse, web};

use postboard_core::DomainError;
use postboard_core::domain::{FieldInput, NewPost, Post, PostPatch};
use postboard_core::error::RepoError;
use postboard_shared::{CreatePostRequest, FieldValue, PostResponse, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::observability::RequestId;
use crate::state::AppState;

fn render(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        body: post.body,
        created_at: Some(post.created_at),
        updated_at: Some(post.updated_at),
    }
}

fn supplied(value: &FieldValue) -> FieldInput<'_> {
    value.as_text().map_or(FieldInput::NotText, FieldInput::Text)
}

/// A create field; `null` reads the same as a missing key.
fn create_field(value: Option<&FieldValue>) -> FieldInput<'_> {
    value.map_or(FieldInput::Absent, supplied)
}

fn update_field(value: Option<&Option<FieldValue>>) -> FieldInput<'_> {
    match value {
        None => FieldInput::Absent,
        Some(None) => FieldInput::Null,
        Some(Some(value)) => supplied(value),
    }
}

/// GET /api/posts
pub async fn index(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;
    let body: Vec<PostResponse> = posts.into_iter().map(render).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/posts
pub async fn store(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let new_post = NewPost::parse(
        create_field(req.title.as_ref()),
        create_field(req.body.as_ref()),
    )
    .map_err(DomainError::from)?;

    let post = state.posts.create(new_post).await?;
    tracing::info!(request_id = %request_id.as_str(), post_id = post.id, "Post created");

    Ok(HttpResponse::Created().json(render(post)))
}

/// GET /api/posts/{id}
pub async fn show(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::post_not_found(id))?;

    Ok(HttpResponse::Ok().json(render(post)))
}

/// PUT|PATCH /api/posts/{id}
///
/// Only supplied fields change. The response is re-read from the store.
pub async fn update(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<i64>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    let patch = PostPatch::parse(
        update_field(req.title.as_ref()),
        update_field(req.body.as_ref()),
    );
    let patch = match patch {
        Ok(patch) => patch,
        // An unknown id is reported ahead of bad input.
        Err(errors) => {
            if state.posts.find_by_id(id).await?.is_none() {
                return Err(AppError::post_not_found(id));
            }
            return Err(DomainError::Validation(errors).into());
        }
    };

    let post = state
        .posts
        .update(id, patch)
        .await?
        .ok_or_else(|| AppError::post_not_found(id))?;
    tracing::info!(request_id = %request_id.as_str(), post_id = id, "Post updated");

    Ok(HttpResponse::Ok().json(render(post)))
}

/// DELETE /api/posts/{id}
pub async fn destroy(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    match state.posts.delete(id).await {
        Ok(()) => {}
        Err(RepoError::NotFound) => return Err(AppError::post_not_found(id)),
        Err(e) => return Err(e.into()),
    }
    tracing::info!(request_id = %request_id.as_str(), post_id = id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}
