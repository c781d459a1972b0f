//! Repository trait describing the remote posts collection.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::posts::Post;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    Transport(String),
    #[error("Request failed with status code {status}")]
    Status { status: u16 },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("invalid request URL: {0}")]
    Url(String),
}

impl RepoError {
    pub fn from_transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }
}

/// The collection of posts behind the REST API. Writes return the record as
/// the server stored it.
#[async_trait]
pub trait PostsRepo: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<Post>, RepoError>;

    async fn create_post(&self, post: &Post) -> Result<Post, RepoError>;

    async fn update_post(&self, post: &Post) -> Result<Post, RepoError>;

    async fn delete_post(&self, id: u64) -> Result<(), RepoError>;
}
