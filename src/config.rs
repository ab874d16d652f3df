// User configuration.
// Loaded from config.toml in the user config directory; every field has a default.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::paths;
use crate::error::{FeedError, Result};
use crate::feed::FeedConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site root; posts are fetched from `<site_url>/<posts_path>`.
    pub site_url: String,
    pub posts_path: String,
    pub batch_size: usize,
    pub cache_ttl_secs: u64,
    /// Items from the end of the list at which the next batch loads.
    pub scroll_threshold: usize,
    pub debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_url: "https://wesleysnipesfacts.com".to_string(),
            posts_path: "posts.json".to_string(),
            batch_size: crate::feed::DEFAULT_BATCH_SIZE,
            cache_ttl_secs: crate::cache::DEFAULT_TTL.as_secs(),
            scroll_threshold: 3,
            debounce_ms: crate::feed::scroll::DEFAULT_DEBOUNCE.as_millis() as u64,
        }
    }
}

impl Config {
    /// Load from an explicit path, or the default location. A missing file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match paths::config_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).map_err(|e| FeedError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(FeedError::Config("batch_size must be at least 1".to_string()));
        }
        if self.posts_path.is_empty() {
            return Err(FeedError::Config("posts_path must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn feed_config(&self, filter: crate::feed::FeedFilter) -> FeedConfig {
        FeedConfig {
            batch_size: self.batch_size,
            filter,
        }
    }
}
