// Post store access.
// The feed reads the entire corpus in one request from a source.

pub mod file;
pub mod http;

use async_trait::async_trait;

use crate::error::Result;
use crate::post::Post;

pub use file::FileSource;
pub use http::HttpSource;

/// Read-only access to the full post list, in store (insertion) order.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch_posts(&self) -> Result<Vec<Post>>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Pick a source for a location: http(s) URLs go over the network, anything else is a path.
pub fn from_location(location: &str, posts_path: &str) -> Result<Box<dyn PostSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location, posts_path)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}
