// Feed module.
// Paginated, cache-backed post feeds and their scroll trigger.

pub mod loader;
pub mod scroll;
pub mod state;

use chrono::{DateTime, Utc};

pub use loader::{BatchOutcome, DEFAULT_BATCH_SIZE, FeedConfig, FeedLoader, RefreshOutcome};
pub use scroll::{ScrollDebounce, Viewport, is_near_bottom};
pub use state::{FeedFilter, FeedState};

/// Source of "now" for cache timestamps and TTL checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
