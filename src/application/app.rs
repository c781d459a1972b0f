//! Application context: owns the post store, the search string, the current
//! route and the two post forms, and applies user actions to them.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::application::action::Action;
use crate::application::fetch::{FetchHandle, FetchState};
use crate::application::form::PostForm;
use crate::application::repos::PostsRepo;
use crate::application::router::Route;
use crate::application::search::filter_posts;
use crate::application::store::{Clock, PostStore};
use crate::domain::posts::Post;

pub struct App {
    store: PostStore,
    fetch: FetchHandle,
    is_loading: bool,
    fetch_error: Option<String>,
    route: Route,
    search: String,
    new_post: PostForm,
    edit_post: PostForm,
}

impl App {
    /// Build the context and start the initial fetch.
    pub fn mount(repo: Arc<dyn PostsRepo>) -> Self {
        let fetch = FetchHandle::mount(repo.clone());
        Self::with_store(PostStore::new(repo), fetch)
    }

    pub fn mount_with_clock(repo: Arc<dyn PostsRepo>, clock: Clock) -> Self {
        let fetch = FetchHandle::mount(repo.clone());
        Self::with_store(PostStore::new(repo).with_clock(clock), fetch)
    }

    fn with_store(store: PostStore, fetch: FetchHandle) -> Self {
        let state = fetch.current();
        Self {
            store,
            fetch,
            is_loading: state.is_loading,
            fetch_error: state.fetch_error,
            route: Route::Home,
            search: String::new(),
            new_post: PostForm::default(),
            edit_post: PostForm::default(),
        }
    }

    /// Wait for the initial fetch and reconcile the store with it.
    pub async fn settle(&mut self) {
        let state = self.fetch.settled().await;
        self.apply_fetch(state);
    }

    /// Pick up a fetch result that arrived since the last look.
    pub fn sync(&mut self) {
        if let Some(state) = self.fetch.take_update() {
            self.apply_fetch(state);
        }
    }

    fn apply_fetch(&mut self, state: FetchState) {
        let FetchState {
            data,
            is_loading,
            fetch_error,
        } = state;
        self.is_loading = is_loading;
        self.fetch_error = fetch_error;
        self.store.replace_all(data);
        self.populate_edit_form();
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref()
    }

    pub fn new_post_form(&self) -> &PostForm {
        &self.new_post
    }

    pub fn edit_post_form(&self) -> &PostForm {
        &self.edit_post
    }

    pub fn search_results(&self) -> Vec<&Post> {
        filter_posts(self.store.posts(), &self.search)
    }

    /// The post addressed by the current `/post/{id}` or `/edit/{id}` route.
    pub fn routed_post(&self) -> Option<&Post> {
        match &self.route {
            Route::Post(param) | Route::EditPost(param) => self.store.find_by_param(param),
            _ => None,
        }
    }

    pub fn navigate(&mut self, path: &str) {
        self.route = Route::parse(path);
        self.populate_edit_form();
    }

    fn populate_edit_form(&mut self) {
        if !matches!(self.route, Route::EditPost(_)) {
            return;
        }
        if let Some(form) = self.routed_post().map(PostForm::from_post) {
            self.edit_post = form;
        }
    }

    pub async fn dispatch(&mut self, action: Action) {
        self.sync();
        match action {
            Action::Navigate(path) => self.navigate(&path),
            Action::Search(text) => self.search = text,
            Action::SetTitle(text) => {
                if let Some(form) = self.active_form() {
                    form.title = text;
                }
            }
            Action::SetBody(text) => {
                if let Some(form) = self.active_form() {
                    form.body = text;
                }
            }
            Action::AppendBody(text) => {
                if let Some(form) = self.active_form() {
                    form.append_body_line(&text);
                }
            }
            Action::Submit => self.submit().await,
            Action::Delete => self.delete().await,
        }
    }

    fn active_form(&mut self) -> Option<&mut PostForm> {
        match self.route {
            Route::NewPost => Some(&mut self.new_post),
            Route::EditPost(_) if self.routed_post().is_some() => Some(&mut self.edit_post),
            _ => {
                warn!(route = %self.route, "no post form on this page");
                None
            }
        }
    }

    async fn submit(&mut self) {
        match self.route.clone() {
            Route::NewPost => self.submit_new_post().await,
            Route::EditPost(param) => self.submit_edit_post(&param).await,
            other => warn!(route = %other, "nothing to submit on this page"),
        }
    }

    async fn submit_new_post(&mut self) {
        let draft = match self.new_post.draft() {
            Ok(draft) => draft,
            Err(err) => {
                warn!(error = %err, "new post form is incomplete");
                return;
            }
        };

        match self.store.create(draft).await {
            Ok(post) => {
                info!(post_id = post.id, "post created");
                self.new_post.clear();
                self.navigate("/");
            }
            Err(err) => error!(error = %err, "Error: {err}"),
        }
    }

    async fn submit_edit_post(&mut self, param: &str) {
        let Some(id) = self.store.find_by_param(param).map(|post| post.id) else {
            warn!(id = param, "post to edit not found");
            return;
        };
        let draft = match self.edit_post.draft() {
            Ok(draft) => draft,
            Err(err) => {
                warn!(error = %err, "edit form is incomplete");
                return;
            }
        };

        match self.store.update(id, draft).await {
            Ok(post) => {
                info!(post_id = post.id, "post updated");
                self.edit_post.clear();
                self.navigate("/");
            }
            Err(err) => error!(error = %err, "Error: {err}"),
        }
    }

    async fn delete(&mut self) {
        let Route::Post(param) = &self.route else {
            warn!(route = %self.route, "nothing to delete on this page");
            return;
        };
        let Some(id) = self.store.find_by_param(param).map(|post| post.id) else {
            warn!(id = %param, "post to delete not found");
            return;
        };

        match self.store.delete(id).await {
            Ok(()) => {
                info!(post_id = id, "post deleted");
                self.navigate("/");
            }
            Err(err) => error!(error = %err, "Error: {err}"),
        }
    }
}
