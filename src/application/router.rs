//! Page dispatch from a route path.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    NewPost,
    Post(String),
    EditPost(String),
    About,
    Missing(String),
}

impl Route {
    /// Map a path onto a page. Trailing slashes are ignored and anything
    /// unrecognised lands on `Missing`.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["post"] => Self::NewPost,
            ["post", id] => Self::Post((*id).to_string()),
            ["edit", id] => Self::EditPost((*id).to_string()),
            ["about"] => Self::About,
            _ => Self::Missing(trimmed.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::NewPost => "/post".to_string(),
            Self::Post(id) => format!("/post/{id}"),
            Self::EditPost(id) => format!("/edit/{id}"),
            Self::About => "/about".to_string(),
            Self::Missing(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
