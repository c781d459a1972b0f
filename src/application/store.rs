//! Client-side post store: the in-memory list every page renders from.
//!
//! Mutations go to the remote collection first; the local list only changes
//! once the request succeeds, and always with the record the server returned.

use std::sync::Arc;

use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, instrument};

use crate::application::repos::{PostsRepo, RepoError};
use crate::domain::error::DomainError;
use crate::domain::posts::{Post, PostDraft, format_post_datetime, local_now, next_post_id};

pub type Clock = fn() -> OffsetDateTime;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub struct PostStore {
    posts: Vec<Post>,
    repo: Arc<dyn PostsRepo>,
    clock: Clock,
}

impl PostStore {
    pub fn new(repo: Arc<dyn PostsRepo>) -> Self {
        Self {
            posts: Vec::new(),
            repo,
            clock: local_now,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    /// Look a post up by a route parameter, compared against the id's
    /// decimal form.
    pub fn find_by_param(&self, param: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id.to_string() == param)
    }

    pub fn replace_all(&mut self, posts: Vec<Post>) {
        self.posts = posts;
    }

    #[instrument(skip(self, draft))]
    pub async fn create(&mut self, draft: PostDraft) -> Result<Post, StoreError> {
        let id = next_post_id(&self.posts);
        let datetime = format_post_datetime((self.clock)())?;
        let record = draft.into_post(id, datetime);

        let created = self.repo.create_post(&record).await?;
        debug!(id = created.id, "appending created post");
        self.posts.push(created.clone());
        Ok(created)
    }

    #[instrument(skip(self, draft))]
    pub async fn update(&mut self, id: u64, draft: PostDraft) -> Result<Post, StoreError> {
        let datetime = format_post_datetime((self.clock)())?;
        let record = draft.into_post(id, datetime);

        let updated = self.repo.update_post(&record).await?;
        for slot in self.posts.iter_mut().filter(|post| post.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: u64) -> Result<(), StoreError> {
        self.repo.delete_post(id).await?;
        self.posts.retain(|post| post.id != id);
        Ok(())
    }
}
