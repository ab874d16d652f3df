// Local post store.
// Reads posts.json straight from disk, for offline use and site checkouts.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Result;
use crate::post::{Post, parse_posts};

use super::PostSource;

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PostSource for FileSource {
    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        let body = tokio::fs::read_to_string(&self.path).await?;
        parse_posts(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedError;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_posts_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("posts.json");
        std::fs::write(&path, r#"[{"id": 1, "title": "Fact #1", "text": "t"}]"#).unwrap();

        let posts = FileSource::new(&path).fetch_posts().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert!(posts[0].tags.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = FileSource::new(temp_dir.path().join("missing.json"))
            .fetch_posts()
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::Io(_)));
    }
}
