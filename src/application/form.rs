use crate::domain::error::DomainError;
use crate::domain::posts::{Post, PostDraft};

/// Text typed into the title and body fields of a post form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub body: String,
}

impl PostForm {
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            body: post.body.clone(),
        }
    }

    pub fn append_body_line(&mut self, line: &str) {
        if !self.body.is_empty() {
            self.body.push('\n');
        }
        self.body.push_str(line);
    }

    pub fn draft(&self) -> Result<PostDraft, DomainError> {
        PostDraft::new(self.title.clone(), self.body.clone())
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.body.clear();
    }
}
