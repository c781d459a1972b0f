use time::{OffsetDateTime, format_description::FormatItem, macros::format_description};

pub use postline_api_types::Post;

use super::error::DomainError;

/// `January 05, 2024 3:04:05 PM`
pub const POST_DATETIME_FORMAT: &[FormatItem<'static>] = format_description!(
    "[month repr:long] [day], [year] [hour repr:12 padding:none]:[minute]:[second] [period]"
);

/// Identifier handed to the next created post: one past the largest id in
/// the store, or `1` for an empty store.
///
/// The id is computed locally, so two clients creating at the same time can
/// pick the same value.
pub fn next_post_id(posts: &[Post]) -> u64 {
    posts.iter().map(|post| post.id).max().map_or(1, |max| max + 1)
}

pub fn format_post_datetime(at: OffsetDateTime) -> Result<String, DomainError> {
    at.format(POST_DATETIME_FORMAT)
        .map_err(|err| DomainError::invariant(format!("failed to format post datetime: {err}")))
}

/// Current wall-clock time in the local offset, falling back to UTC when the
/// offset cannot be determined.
pub fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Title and body of a post about to be written. Both must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    body: String,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Result<Self, DomainError> {
        let title = title.into();
        let body = body.into();
        if title.is_empty() {
            return Err(DomainError::validation("post title is required"));
        }
        if body.is_empty() {
            return Err(DomainError::validation("post body is required"));
        }
        Ok(Self { title, body })
    }

    pub fn into_post(self, id: u64, datetime: String) -> Post {
        Post {
            id,
            title: self.title,
            datetime,
            body: self.body,
        }
    }
}
