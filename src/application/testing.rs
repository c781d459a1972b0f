//! In-memory repository used by the application unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::application::repos::{PostsRepo, RepoError};
use crate::domain::posts::Post;

#[derive(Default)]
pub(crate) struct StubPostsRepo {
    pub posts: Vec<Post>,
    pub fail_list: bool,
    pub fail_writes: bool,
    pub list_gate: Option<Arc<Notify>>,
    pub calls: Mutex<Vec<String>>,
}

impl StubPostsRepo {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts,
            ..Self::default()
        }
    }

    pub fn failing_writes(posts: Vec<Post>) -> Self {
        Self {
            posts,
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn write_result(&self) -> Result<(), RepoError> {
        if self.fail_writes {
            Err(RepoError::Status { status: 500 })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PostsRepo for StubPostsRepo {
    async fn list_posts(&self) -> Result<Vec<Post>, RepoError> {
        if let Some(gate) = &self.list_gate {
            gate.notified().await;
        }
        self.record("GET /posts".into());
        if self.fail_list {
            return Err(RepoError::Transport("Network Error".into()));
        }
        Ok(self.posts.clone())
    }

    async fn create_post(&self, post: &Post) -> Result<Post, RepoError> {
        self.record(format!("POST /posts id={}", post.id));
        self.write_result()?;
        Ok(post.clone())
    }

    async fn update_post(&self, post: &Post) -> Result<Post, RepoError> {
        self.record(format!("PUT /posts/{}", post.id));
        self.write_result()?;
        Ok(post.clone())
    }

    async fn delete_post(&self, id: u64) -> Result<(), RepoError> {
        self.record(format!("DELETE /posts/{id}"));
        self.write_result()
    }
}

pub(crate) fn sample_posts() -> Vec<Post> {
    vec![
        Post::new(1, "First Post", "July 01, 2021 11:17:36 AM", "Hello from Rust."),
        Post::new(2, "Second Post", "July 02, 2021 9:00:00 AM", "Borrow checker notes."),
        Post::new(3, "Third Post", "July 03, 2021 4:45:10 PM", "Async in practice."),
    ]
}
