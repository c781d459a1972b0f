//! reqwest adapter for the posts collection (`json-server` style REST).

use async_trait::async_trait;
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::application::repos::{PostsRepo, RepoError};
use crate::domain::posts::Post;

use super::error::InfraError;

const POSTS_PATH: &str = "posts";

#[derive(Clone, Debug)]
pub struct HttpPostsRepo {
    client: Client,
    base: Url,
}

impl HttpPostsRepo {
    /// `base_url` is the API root; `/posts` is resolved against it, so a
    /// path prefix such as `https://example.com/api` is kept.
    pub fn new(base_url: &str) -> Result<Self, InfraError> {
        let mut base = Url::parse(base_url).map_err(|err| {
            InfraError::configuration(format!("invalid API base URL `{base_url}`: {err}"))
        })?;
        if base.cannot_be_a_base() {
            return Err(InfraError::configuration(format!(
                "API base URL `{base_url}` cannot be used as a base"
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(Self::user_agent())
            .build()
            .map_err(|err| InfraError::http_client(err.to_string()))?;

        Ok(Self { client, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("postline/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, RepoError> {
        self.base
            .join(path)
            .map_err(|err| RepoError::Url(err.to_string()))
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Post>,
    ) -> Result<Response, RepoError> {
        let url = self.url(path)?;
        debug!(%method, %url, "posts api request");

        let mut req = self.client.request(method, url);
        if let Some(post) = body {
            req = req.json(post);
        }

        let resp = req.send().await.map_err(RepoError::from_transport)?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), body = %text, "posts api rejected request");
            return Err(RepoError::Status {
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Post>,
    ) -> Result<T, RepoError> {
        let resp = self.send(method, path, body).await?;
        let bytes = resp.bytes().await.map_err(RepoError::from_transport)?;
        serde_json::from_slice(&bytes).map_err(|err| RepoError::Decode(err.to_string()))
    }

    async fn request_unit(&self, method: Method, path: &str) -> Result<(), RepoError> {
        self.send(method, path, None).await?;
        Ok(())
    }
}

#[async_trait]
impl PostsRepo for HttpPostsRepo {
    async fn list_posts(&self) -> Result<Vec<Post>, RepoError> {
        self.request(Method::GET, POSTS_PATH, None).await
    }

    async fn create_post(&self, post: &Post) -> Result<Post, RepoError> {
        self.request(Method::POST, POSTS_PATH, Some(post)).await
    }

    async fn update_post(&self, post: &Post) -> Result<Post, RepoError> {
        let path = format!("{POSTS_PATH}/{}", post.id);
        self.request(Method::PUT, &path, Some(post)).await
    }

    async fn delete_post(&self, id: u64) -> Result<(), RepoError> {
        let path = format!("{POSTS_PATH}/{id}");
        self.request_unit(Method::DELETE, &path).await
    }
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;

    use super::*;

    const POSTS_JSON: &str = r#"[
        {"id":1,"title":"First","datetime":"July 01, 2021 11:17:36 AM","body":"one"},
        {"id":2,"title":"Second","datetime":"July 02, 2021 9:00:00 AM","body":"two"}
    ]"#;

    fn repo(server: &MockServer) -> HttpPostsRepo {
        HttpPostsRepo::new(&server.base_url()).expect("repo")
    }

    #[test]
    fn base_keeps_path_prefix() {
        let repo = HttpPostsRepo::new("https://example.com/api").expect("repo");
        assert_eq!(repo.base().as_str(), "https://example.com/api/");
        assert_eq!(
            repo.url("posts/3").expect("url").as_str(),
            "https://example.com/api/posts/3"
        );
    }

    #[test]
    fn rejects_unparseable_base() {
        let err = HttpPostsRepo::new("not a url").expect_err("invalid base");
        assert!(matches!(err, InfraError::Configuration { .. }));
    }

    #[tokio::test]
    async fn list_decodes_collection() -> Result<(), RepoError> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/posts");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(POSTS_JSON);
            })
            .await;

        let posts = repo(&server).list_posts().await?;
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].title, "Second");
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn create_posts_full_record_and_returns_echo() -> Result<(), RepoError> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/posts").json_body(serde_json::json!({
                    "id": 3,
                    "title": "T",
                    "datetime": "January 05, 2024 3:04:05 PM",
                    "body": "B"
                }));
                then.status(201)
                    .header("content-type", "application/json")
                    .body(r#"{"id":3,"title":"T","datetime":"January 05, 2024 3:04:05 PM","body":"B"}"#);
            })
            .await;

        let post = Post::new(3, "T", "January 05, 2024 3:04:05 PM", "B");
        let created = repo(&server).create_post(&post).await?;
        assert_eq!(created, post);
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn update_puts_to_item_path() -> Result<(), RepoError> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("PUT").path("/posts/2");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"id":2,"title":"X","datetime":"now","body":"two"}"#);
            })
            .await;

        let updated = repo(&server)
            .update_post(&Post::new(2, "X", "now", "two"))
            .await?;
        assert_eq!(updated.title, "X");
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn delete_ignores_response_body() -> Result<(), RepoError> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("DELETE").path("/posts/2");
                then.status(200)
                    .header("content-type", "application/json")
                    .body("{}");
            })
            .await;

        repo(&server).delete_post(2).await?;
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn error_status_is_reported_with_code() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("DELETE").path("/posts/9");
                then.status(404).body("{}");
            })
            .await;

        let err = repo(&server).delete_post(9).await.expect_err("404");
        assert!(matches!(err, RepoError::Status { status: 404 }));
        assert_eq!(err.to_string(), "Request failed with status code 404");
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/posts");
                then.status(200).body("<html>");
            })
            .await;

        let err = repo(&server).list_posts().await.expect_err("bad json");
        assert!(matches!(err, RepoError::Decode(_)));
    }
}
