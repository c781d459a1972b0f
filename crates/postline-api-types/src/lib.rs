//! Shared wire types for the posts collection.
//!
//! The collection is a plain JSON array of posts served under `/posts`;
//! every write echoes the stored record back.

use serde::{Deserialize, Serialize};

/// A blog post exactly as the remote collection stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub datetime: String,
    pub body: String,
}

impl Post {
    pub fn new(
        id: u64,
        title: impl Into<String>,
        datetime: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            datetime: datetime.into(),
            body: body.into(),
        }
    }
}
