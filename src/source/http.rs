// HTTP post store client.
// Fetches posts.json from the site with a plain GET.

use async_trait::async_trait;
use reqwest::{
    Client, Response,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{FeedError, Result};
use crate::post::{Post, parse_posts};

use super::PostSource;

/// Post store reachable over HTTP.
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    /// Create a source for `<base_url>/<posts_path>`.
    pub fn new(base_url: &str, posts_path: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("factfeed"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(FeedError::Http)?;

        Ok(Self {
            client,
            url: join_url(base_url, posts_path),
        })
    }

    /// Check response status and convert errors.
    fn check_response(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(FeedError::Status(status))
        }
    }
}

#[async_trait]
impl PostSource for HttpSource {
    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        tracing::debug!(url = %self.url, "fetching posts");
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(FeedError::Http)?;

        let body = Self::check_response(response)?.text().await?;
        parse_posts(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Join a base URL and a relative path with exactly one slash between them.
fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
