//! One-shot load of the posts collection issued when the application mounts.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::application::repos::PostsRepo;
use crate::domain::posts::Post;

/// Observable state of the initial fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchState {
    pub data: Vec<Post>,
    pub is_loading: bool,
    pub fetch_error: Option<String>,
}

impl FetchState {
    pub fn loading() -> Self {
        Self {
            data: Vec::new(),
            is_loading: true,
            fetch_error: None,
        }
    }

    pub fn loaded(data: Vec<Post>) -> Self {
        Self {
            data,
            is_loading: false,
            fetch_error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            data: Vec::new(),
            is_loading: false,
            fetch_error: Some(message.into()),
        }
    }
}

/// Receiving side of the fetch. Dropping the handle does not cancel the
/// request; a late result is discarded.
#[derive(Debug)]
pub struct FetchHandle {
    rx: watch::Receiver<FetchState>,
}

impl FetchHandle {
    /// Spawn the `GET` for the whole collection. The state is `loading` until
    /// the request settles either way. Must be called inside a tokio runtime.
    pub fn mount(repo: Arc<dyn PostsRepo>) -> Self {
        let (tx, rx) = watch::channel(FetchState::loading());

        tokio::spawn(async move {
            let state = match repo.list_posts().await {
                Ok(posts) => {
                    debug!(count = posts.len(), "initial fetch loaded posts");
                    FetchState::loaded(posts)
                }
                Err(err) => {
                    warn!(error = %err, "initial fetch failed");
                    FetchState::failed(err.to_string())
                }
            };

            if tx.send(state).is_err() {
                debug!("initial fetch settled after unmount; result dropped");
            }
        });

        Self { rx }
    }

    pub fn current(&self) -> FetchState {
        self.rx.borrow().clone()
    }

    /// The state published since the last observation, if any.
    pub fn take_update(&mut self) -> Option<FetchState> {
        // `Receiver::has_changed` errors once the sender is gone, which is
        // right after the fetch task publishes; ask the borrow instead.
        let state = self.rx.borrow_and_update();
        state.has_changed().then(|| state.clone())
    }

    /// Wait until the request has settled.
    pub async fn settled(&mut self) -> FetchState {
        match self.rx.wait_for(|state| !state.is_loading).await {
            Ok(state) => state.clone(),
            Err(_) => FetchState::failed("initial fetch was aborted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::Notify;

    use super::*;
    use crate::application::testing::{StubPostsRepo, sample_posts};

    #[tokio::test]
    async fn loading_until_request_settles() {
        let gate = Arc::new(Notify::new());
        let repo = StubPostsRepo {
            posts: sample_posts(),
            list_gate: Some(gate.clone()),
            ..StubPostsRepo::default()
        };
        let mut handle = FetchHandle::mount(Arc::new(repo));

        assert_eq!(handle.current(), FetchState::loading());
        tokio::task::yield_now().await;
        assert!(handle.current().is_loading);

        gate.notify_one();
        let state = handle.settled().await;
        assert!(!state.is_loading);
        assert_eq!(state.fetch_error, None);
        assert_eq!(state.data, sample_posts());
    }

    #[tokio::test]
    async fn failure_surfaces_message_and_empty_data() {
        let repo = StubPostsRepo {
            posts: sample_posts(),
            fail_list: true,
            ..StubPostsRepo::default()
        };
        let mut handle = FetchHandle::mount(Arc::new(repo));

        let state = handle.settled().await;
        assert!(!state.is_loading);
        assert!(state.data.is_empty());
        assert_eq!(state.fetch_error.as_deref(), Some("Network Error"));
    }

    #[tokio::test]
    async fn take_update_reports_each_state_once() {
        let gate = Arc::new(Notify::new());
        let repo = StubPostsRepo {
            list_gate: Some(gate.clone()),
            ..StubPostsRepo::with_posts(sample_posts())
        };
        let mut handle = FetchHandle::mount(Arc::new(repo));
        assert_eq!(handle.take_update(), None);

        gate.notify_one();
        let mut observer = handle.rx.clone();
        observer
            .wait_for(|state| !state.is_loading)
            .await
            .expect("sender alive");

        let update = handle.take_update().expect("settled state published");
        assert_eq!(update.data.len(), 3);
        assert_eq!(handle.take_update(), None);
    }
}
