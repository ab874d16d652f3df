// Feed loader: cache-or-network population and batched rendering.
// One loader owns one feed's state; clones share it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;

use crate::cache::PostsCache;
use crate::error::Result;
use crate::post::Post;
use crate::render::{RenderOptions, RenderTarget, post_node};
use crate::source::PostSource;

use super::state::{FeedFilter, FeedState};
use super::{Clock, SystemClock};

/// Posts rendered per batch.
pub const DEFAULT_BATCH_SIZE: usize = 20;

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub batch_size: usize,
    pub filter: FeedFilter,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            filter: FeedFilter::All,
        }
    }
}

/// Result of one `load_next_batch` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Another call was in flight; nothing happened.
    Busy,
    /// This many posts were appended to the target.
    Rendered(usize),
    /// The cursor is at the end; scroll loading is detached.
    Exhausted,
}

/// Result of a background cache refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Store content matched the cached snapshot.
    Unchanged,
    /// Cache rewritten and later batches will use this many store posts.
    Updated { posts: usize },
    /// Fetch failed; ignored.
    Failed,
}

struct Shared<R> {
    source: Arc<dyn PostSource>,
    cache: PostsCache,
    clock: Arc<dyn Clock>,
    config: FeedConfig,
    render: RenderOptions,
    state: Mutex<FeedState>,
    target: Mutex<R>,
    refresh: Mutex<Option<JoinHandle<RefreshOutcome>>>,
}

/// Incrementally renders a feed into a target.
pub struct FeedLoader<R> {
    shared: Arc<Shared<R>>,
}

impl<R> Clone for FeedLoader<R> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds the `loading` flag for one call and clears it on every exit path.
struct LoadingGuard<'a> {
    state: &'a Mutex<FeedState>,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(state: &'a Mutex<FeedState>) -> Option<Self> {
        let mut guard = lock(state);
        if guard.loading {
            return None;
        }
        guard.loading = true;
        Some(Self { state })
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).loading = false;
    }
}

impl<R: RenderTarget> FeedLoader<R> {
    pub fn new(
        source: Arc<dyn PostSource>,
        cache: PostsCache,
        target: R,
        config: FeedConfig,
    ) -> Self {
        Self::with_clock(source, cache, target, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        source: Arc<dyn PostSource>,
        cache: PostsCache,
        target: R,
        config: FeedConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let render = config.filter.render_options();
        Self {
            shared: Arc::new(Shared {
                source,
                cache,
                clock,
                config,
                render,
                state: Mutex::new(FeedState::new()),
                target: Mutex::new(target),
                refresh: Mutex::new(None),
            }),
        }
    }

    /// Render the next batch, populating the feed first if needed.
    ///
    /// Returns `Busy` without doing anything when a previous call has not
    /// finished. Errors come only from the foreground fetch and leave the
    /// feed unpopulated so a later call can retry.
    pub async fn load_next_batch(&self) -> Result<BatchOutcome> {
        let Some(_loading) = LoadingGuard::acquire(&self.shared.state) else {
            tracing::trace!("feed load already in flight");
            return Ok(BatchOutcome::Busy);
        };

        let populated = lock(&self.shared.state).is_populated();
        if !populated {
            if let Err(e) = self.populate().await {
                tracing::error!(error = %e, source = %self.shared.source.describe(), "error loading posts");
                return Err(e);
            }
        }

        let nodes: Vec<_> = {
            let state = lock(&self.shared.state);
            state
                .window(self.shared.config.batch_size)
                .iter()
                .map(|post| post_node(post, &self.shared.render))
                .collect()
        };

        if nodes.is_empty() {
            lock(&self.shared.state).attached = false;
            return Ok(BatchOutcome::Exhausted);
        }

        let count = nodes.len();
        lock(&self.shared.target).append(nodes);

        let mut state = lock(&self.shared.state);
        state.advance(count);
        if state.is_exhausted() {
            state.attached = false;
        }
        tracing::debug!(rendered = count, cursor = state.cursor(), "rendered feed batch");

        Ok(BatchOutcome::Rendered(count))
    }

    async fn populate(&self) -> Result<()> {
        let shared = &self.shared;

        if let Some(posts) = shared.cache.read_fresh(shared.clock.now()) {
            tracing::debug!(posts = posts.len(), "feed served from cache");
            lock(&shared.state).populate(posts, &shared.config.filter);
            self.spawn_refresh();
            return Ok(());
        }

        let posts = shared.source.fetch_posts().await?;
        tracing::info!(posts = posts.len(), "fetched posts");
        shared.cache.write(&posts, shared.clock.now());
        lock(&shared.state).populate(posts, &shared.config.filter);
        Ok(())
    }

    fn spawn_refresh(&self) {
        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(async move { shared.refresh().await });
        *lock(&self.shared.refresh) = Some(handle);
    }

    /// Await the background refresh started by the last cache hit, if any.
    pub async fn wait_for_refresh(&self) -> Option<RefreshOutcome> {
        let handle = lock(&self.shared.refresh).take()?;
        handle.await.ok()
    }

    pub fn cursor(&self) -> usize {
        lock(&self.shared.state).cursor()
    }

    /// Posts in this feed after filtering.
    pub fn len(&self) -> usize {
        lock(&self.shared.state).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.shared.state).is_empty()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.shared.state).loading
    }

    pub fn is_populated(&self) -> bool {
        lock(&self.shared.state).is_populated()
    }

    /// Whether scroll-triggered loading should still call this loader.
    pub fn is_attached(&self) -> bool {
        lock(&self.shared.state).attached
    }

    pub fn filter(&self) -> &FeedFilter {
        &self.shared.config.filter
    }

    /// Snapshot of the feed's posts in display order.
    pub fn posts(&self) -> Vec<Post> {
        lock(&self.shared.state).posts().to_vec()
    }

    /// Borrow the render target.
    pub fn with_target<T>(&self, f: impl FnOnce(&R) -> T) -> T {
        f(&lock(&self.shared.target))
    }
}

impl<R> Shared<R> {
    async fn refresh(&self) -> RefreshOutcome {
        let fresh = match self.source.fetch_posts().await {
            Ok(posts) => posts,
            Err(e) => {
                tracing::debug!(error = %e, "background refresh failed");
                return RefreshOutcome::Failed;
            }
        };

        let Ok(fresh_json) = serde_json::to_string(&fresh) else {
            return RefreshOutcome::Failed;
        };
        let cached_json = self
            .cache
            .read_envelope()
            .and_then(|envelope| serde_json::to_string(&envelope.posts).ok());

        if cached_json.as_deref() == Some(fresh_json.as_str()) {
            tracing::debug!("posts cache is current");
            return RefreshOutcome::Unchanged;
        }

        self.cache.write(&fresh, self.clock.now());
        let count = fresh.len();
        lock(&self.state).replace(fresh, &self.config.filter);
        tracing::debug!(posts = count, "posts cache refreshed");

        RefreshOutcome::Updated { posts: count }
    }
}
