use crate::domain::posts::Post;

/// Posts whose title or body contains `search`, ignoring case, newest
/// appended first. An empty search keeps every post.
pub fn filter_posts<'a>(posts: &'a [Post], search: &str) -> Vec<&'a Post> {
    let needle = search.to_lowercase();
    posts
        .iter()
        .rev()
        .filter(|post| {
            post.title.to_lowercase().contains(&needle) || post.body.to_lowercase().contains(&needle)
        })
        .collect()
}
