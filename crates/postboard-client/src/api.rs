//! Post API port and its HTTP implementation.

use async_trait::async_trait;
use postboard_shared::{
    CreatePostRequest, ErrorResponse, HealthResponse, PostResponse, UpdatePostRequest,
};
use reqwest::{Response, StatusCode};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::normalize::normalize_post_list;

/// Operations the post list needs from the API.
#[async_trait]
pub trait PostsApi: Send + Sync {
    /// All posts in server order, whichever envelope they arrive in.
    async fn list(&self) -> Result<Vec<PostResponse>, ClientError>;

    async fn show(&self, id: i64) -> Result<PostResponse, ClientError>;

    /// Create a post and return the server's copy, id included.
    async fn create(&self, request: &CreatePostRequest) -> Result<PostResponse, ClientError>;

    async fn update(
        &self,
        id: i64,
        request: &UpdatePostRequest,
    ) -> Result<PostResponse, ClientError>;

    async fn destroy(&self, id: i64) -> Result<(), ClientError>;

    async fn health(&self) -> Result<HealthResponse, ClientError>;
}

/// [`PostsApi`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpPostsApi {
    config: ClientConfig,
    http: reqwest::Client,
}

impl HttpPostsApi {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Transport)?;

        tracing::info!(base_url = %config.base_url, "Post API client configured");
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn post_url(&self, id: i64) -> String {
        self.config.url(&format!("/posts/{id}"))
    }
}

/// Pass 2xx responses through; turn everything else into a [`ClientError`].
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    tracing::debug!(status = status.as_u16(), url = %response.url(), "Post API request failed");
    match status {
        StatusCode::NOT_FOUND => Err(ClientError::NotFound),
        StatusCode::UNPROCESSABLE_ENTITY => {
            let body = response.text().await?;
            let problem = serde_json::from_str::<ErrorResponse>(&body)
                .unwrap_or_else(|_| ErrorResponse::new(422, "Validation Failed").with_detail(body));
            Err(ClientError::Validation(problem))
        }
        _ => Err(ClientError::Status {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        }),
    }
}

#[async_trait]
impl PostsApi for HttpPostsApi {
    async fn list(&self) -> Result<Vec<PostResponse>, ClientError> {
        let response = self.http.get(self.config.url("/posts")).send().await?;
        let body: serde_json::Value = check(response).await?.json().await?;
        normalize_post_list(body)
    }

    async fn show(&self, id: i64) -> Result<PostResponse, ClientError> {
        let response = self.http.get(self.post_url(id)).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn create(&self, request: &CreatePostRequest) -> Result<PostResponse, ClientError> {
        let response = self
            .http
            .post(self.config.url("/posts"))
            .json(request)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn update(
        &self,
        id: i64,
        request: &UpdatePostRequest,
    ) -> Result<PostResponse, ClientError> {
        let response = self
            .http
            .patch(self.post_url(id))
            .json(request)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn destroy(&self, id: i64) -> Result<(), ClientError> {
        let response = self.http.delete(self.post_url(id)).send().await?;
        check(response).await?;
        Ok(())
    }

    async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self.http.get(self.config.url("/health")).send().await?;
        Ok(check(response).await?.json().await?)
    }
}
