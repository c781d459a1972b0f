use askama::{Error as AskamaError, Template};
use thiserror::Error;
use time::OffsetDateTime;

use crate::application::app::App;
use crate::application::error::AppError;
use crate::application::form::PostForm;
use crate::application::router::Route;
use crate::domain::posts::Post;

const EXCERPT_CHARS: usize = 25;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for AppError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;
        AppError::render(format!("{public_message} ({source}): {error}"))
    }
}

pub fn render_template<T: Template>(template: &T) -> Result<String, TemplateRenderError> {
    template.render().map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
    })
}

#[derive(Clone)]
pub struct BrandView {
    pub title: String,
}

#[derive(Clone)]
pub struct NavigationLinkView {
    pub label: &'static str,
    pub href: &'static str,
}

#[derive(Clone)]
pub struct NavigationView {
    pub search: String,
    pub entries: Vec<NavigationLinkView>,
}

#[derive(Clone)]
pub struct FooterView {
    pub copy: String,
}

#[derive(Clone)]
pub struct LayoutChrome {
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub footer: FooterView,
}

impl LayoutChrome {
    pub fn new(site_title: &str, search: &str, year: i32) -> Self {
        Self {
            brand: BrandView {
                title: site_title.to_string(),
            },
            navigation: NavigationView {
                search: search.to_string(),
                entries: vec![
                    NavigationLinkView {
                        label: "Home",
                        href: "/",
                    },
                    NavigationLinkView {
                        label: "Post",
                        href: "/post",
                    },
                    NavigationLinkView {
                        label: "About",
                        href: "/about",
                    },
                ],
            },
            footer: FooterView {
                copy: format!("Copyright \u{a9} {year}"),
            },
        }
    }

    /// Chrome for the current moment, using the UTC year in the footer.
    pub fn current(site_title: &str, search: &str) -> Self {
        Self::new(site_title, search, OffsetDateTime::now_utc().year())
    }
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub footer: FooterView,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: LayoutChrome, content: T) -> Self {
        Self {
            brand: chrome.brand,
            navigation: chrome.navigation,
            footer: chrome.footer,
            content,
        }
    }
}

#[derive(Clone)]
pub struct PostCard {
    pub id: u64,
    pub title: String,
    pub datetime: String,
    pub excerpt: String,
}

impl PostCard {
    pub fn from_post(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            datetime: post.datetime.clone(),
            excerpt: excerpt(&post.body),
        }
    }
}

/// At most `EXCERPT_CHARS` characters of the body, marked with `...` when cut.
pub fn excerpt(body: &str) -> String {
    if body.chars().count() <= EXCERPT_CHARS {
        return body.to_string();
    }
    let head: String = body.chars().take(EXCERPT_CHARS).collect();
    format!("{head}...")
}

/// Home feed. `notice` replaces the list while loading, after a failed
/// fetch, or when nothing matches.
pub struct HomeView {
    pub notice: String,
    pub posts: Vec<PostCard>,
}

impl HomeView {
    pub fn from_app(app: &App) -> Self {
        if app.is_loading() {
            return Self::notice("Loading posts...");
        }
        if let Some(error) = app.fetch_error() {
            return Self::notice(error);
        }

        let posts: Vec<PostCard> = app
            .search_results()
            .into_iter()
            .map(PostCard::from_post)
            .collect();
        if posts.is_empty() {
            return Self::notice("No posts to display.");
        }
        Self {
            notice: String::new(),
            posts,
        }
    }

    fn notice(message: &str) -> Self {
        Self {
            notice: message.to_string(),
            posts: Vec::new(),
        }
    }
}

#[derive(Template)]
#[template(path = "home.txt")]
pub struct HomeTemplate {
    pub view: LayoutContext<HomeView>,
}

pub struct PostDetailView {
    pub found: bool,
    pub id: u64,
    pub title: String,
    pub datetime: String,
    pub body: String,
}

impl PostDetailView {
    pub fn from_post(post: Option<&Post>) -> Self {
        match post {
            Some(post) => Self {
                found: true,
                id: post.id,
                title: post.title.clone(),
                datetime: post.datetime.clone(),
                body: post.body.clone(),
            },
            None => Self {
                found: false,
                id: 0,
                title: String::new(),
                datetime: String::new(),
                body: String::new(),
            },
        }
    }
}

#[derive(Template)]
#[template(path = "post.txt")]
pub struct PostTemplate {
    pub view: LayoutContext<PostDetailView>,
}

pub struct PostFormView {
    pub found: bool,
    pub id: u64,
    pub title: String,
    pub body: String,
}

impl PostFormView {
    pub fn new(form: &PostForm) -> Self {
        Self {
            found: true,
            id: 0,
            title: form.title.clone(),
            body: form.body.clone(),
        }
    }

    pub fn editing(post: Option<&Post>, form: &PostForm) -> Self {
        Self {
            found: post.is_some(),
            id: post.map_or(0, |post| post.id),
            title: form.title.clone(),
            body: form.body.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "new_post.txt")]
pub struct NewPostTemplate {
    pub view: LayoutContext<PostFormView>,
}

#[derive(Template)]
#[template(path = "edit_post.txt")]
pub struct EditPostTemplate {
    pub view: LayoutContext<PostFormView>,
}

pub struct AboutView {
    pub site_title: String,
}

#[derive(Template)]
#[template(path = "about.txt")]
pub struct AboutTemplate {
    pub view: LayoutContext<AboutView>,
}

pub struct MissingView {
    pub path: String,
}

#[derive(Template)]
#[template(path = "missing.txt")]
pub struct MissingTemplate {
    pub view: LayoutContext<MissingView>,
}

/// Render the page for the application's current route.
pub fn render_page(app: &App, chrome: LayoutChrome) -> Result<String, TemplateRenderError> {
    let rendered = match app.route() {
        Route::Home => render_template(&HomeTemplate {
            view: LayoutContext::new(chrome, HomeView::from_app(app)),
        }),
        Route::Post(_) => render_template(&PostTemplate {
            view: LayoutContext::new(chrome, PostDetailView::from_post(app.routed_post())),
        }),
        Route::NewPost => render_template(&NewPostTemplate {
            view: LayoutContext::new(chrome, PostFormView::new(app.new_post_form())),
        }),
        Route::EditPost(_) => render_template(&EditPostTemplate {
            view: LayoutContext::new(
                chrome,
                PostFormView::editing(app.routed_post(), app.edit_post_form()),
            ),
        }),
        Route::About => {
            let site_title = chrome.brand.title.clone();
            render_template(&AboutTemplate {
                view: LayoutContext::new(chrome, AboutView { site_title }),
            })
        }
        Route::Missing(path) => render_template(&MissingTemplate {
            view: LayoutContext::new(chrome, MissingView { path: path.clone() }),
        }),
    }?;

    Ok(rendered.trim().to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::action::Action;
    use crate::application::testing::{StubPostsRepo, sample_posts};

    fn chrome(app: &App) -> LayoutChrome {
        LayoutChrome::new("Postline", app.search(), 2024)
    }

    async fn loaded_app() -> App {
        let mut app = App::mount(Arc::new(StubPostsRepo::with_posts(sample_posts())));
        app.settle().await;
        app
    }

    #[test]
    fn excerpt_cuts_long_bodies() {
        assert_eq!(excerpt("short body"), "short body");
        assert_eq!(excerpt("abcdefghijklmnopqrstuvwxy"), "abcdefghijklmnopqrstuvwxy");
        assert_eq!(
            excerpt("abcdefghijklmnopqrstuvwxyz"),
            "abcdefghijklmnopqrstuvwxy..."
        );
        assert_eq!(excerpt(&"é".repeat(30)), format!("{}...", "é".repeat(25)));
    }

    #[tokio::test]
    async fn home_shows_loading_before_fetch_settles() {
        let app = App::mount(Arc::new(StubPostsRepo::with_posts(sample_posts())));
        let page = render_page(&app, chrome(&app)).expect("render");
        assert!(page.contains("Loading posts..."));
        assert!(page.contains("Copyright \u{a9} 2024"));
    }

    #[tokio::test]
    async fn home_lists_results_newest_first() {
        let app = loaded_app().await;
        let page = render_page(&app, chrome(&app)).expect("render");

        let third = page.find("Third Post").expect("third listed");
        let first = page.find("First Post").expect("first listed");
        assert!(third < first);
        assert!(page.contains("/post/3"));
        assert!(page.starts_with("Postline"));
    }

    #[tokio::test]
    async fn home_reports_fetch_error() {
        let mut app = App::mount(Arc::new(StubPostsRepo {
            fail_list: true,
            ..StubPostsRepo::default()
        }));
        app.settle().await;

        let page = render_page(&app, chrome(&app)).expect("render");
        assert!(page.contains("Network Error"));
        assert!(!page.contains("No posts to display."));
    }

    #[tokio::test]
    async fn home_without_matches_says_so() {
        let mut app = loaded_app().await;
        app.dispatch(Action::Search("nothing like this".into())).await;

        let page = render_page(&app, chrome(&app)).expect("render");
        assert!(page.contains("No posts to display."));
        assert!(page.contains("nothing like this"));
    }

    #[tokio::test]
    async fn post_page_shows_body_or_not_found() {
        let mut app = loaded_app().await;

        app.navigate("/post/2");
        let page = render_page(&app, chrome(&app)).expect("render");
        assert!(page.contains("Second Post"));
        assert!(page.contains("Borrow checker notes."));
        assert!(page.contains("/edit/2"));

        app.navigate("/post/99");
        let page = render_page(&app, chrome(&app)).expect("render");
        assert!(page.contains("Post Not Found"));
        assert!(page.contains("Well, that's disappointing."));
    }

    #[tokio::test]
    async fn edit_page_is_prefilled() {
        let mut app = loaded_app().await;
        app.navigate("/edit/1");

        let page = render_page(&app, chrome(&app)).expect("render");
        assert!(page.contains("Edit Post"));
        assert!(page.contains("Title: First Post"));
        assert!(page.contains("Hello from Rust."));
    }

    #[tokio::test]
    async fn static_pages_render() {
        let mut app = loaded_app().await;

        app.navigate("/about");
        let page = render_page(&app, chrome(&app)).expect("render");
        assert!(page.contains("About"));

        app.navigate("/does/not/exist");
        let page = render_page(&app, chrome(&app)).expect("render");
        assert!(page.contains("Page Not Found"));
        assert!(page.contains("/does/not/exist"));
    }
}
