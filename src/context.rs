// Shared wiring for every feed the program creates.
// One post source, one posts cache, one config; loaders are built from them.

use std::sync::Arc;

use crate::cache::{FileStore, KeyValueStore, MemoryStore, PostsCache};
use crate::config::Config;
use crate::error::Result;
use crate::feed::{FeedFilter, FeedLoader};
use crate::render::Blogroll;
use crate::source::{self, PostSource};

#[derive(Clone)]
pub struct SiteContext {
    pub source: Arc<dyn PostSource>,
    pub cache: PostsCache,
    pub config: Config,
}

impl SiteContext {
    pub fn new(source: Arc<dyn PostSource>, store: Arc<dyn KeyValueStore>, config: Config) -> Self {
        let cache = PostsCache::new(store, config.cache_ttl());
        Self {
            source,
            cache,
            config,
        }
    }

    /// Wire up from config. `location` (URL or path) overrides the configured site.
    pub fn from_config(config: Config, location: Option<&str>) -> Result<Self> {
        let location = location.unwrap_or(&config.site_url);
        let source: Arc<dyn PostSource> =
            Arc::from(source::from_location(location, &config.posts_path)?);

        let store: Arc<dyn KeyValueStore> = match FileStore::in_cache_dir() {
            Some(store) => Arc::new(store),
            None => {
                tracing::warn!("no cache directory available, caching in memory only");
                Arc::new(MemoryStore::new())
            }
        };

        tracing::info!(source = %source.describe(), "using post store");
        Ok(Self::new(source, store, config))
    }

    /// A fresh feed instance with its own state.
    pub fn loader(&self, filter: FeedFilter) -> FeedLoader<Blogroll> {
        FeedLoader::new(
            Arc::clone(&self.source),
            self.cache.clone(),
            Blogroll::new(),
            self.config.feed_config(filter),
        )
    }
}
