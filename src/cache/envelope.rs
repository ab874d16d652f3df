// Posts cache envelope and TTL handling.
// Reads and writes fail soft: storage problems look like an absent cache.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::post::Post;

use super::store::KeyValueStore;

/// Storage key for the posts snapshot.
pub const POSTS_CACHE_KEY: &str = "factfeed_posts_cache_v1";

/// Default TTL for the posts snapshot: 1 hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Point-in-time snapshot of the post store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEnvelope {
    /// When the snapshot was taken, as unix milliseconds.
    #[serde(rename = "ts", with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub posts: Vec<Post>,
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    #[serde(rename = "ts", with = "chrono::serde::ts_milliseconds")]
    timestamp: DateTime<Utc>,
    posts: &'a [Post],
}

impl CacheEnvelope {
    /// True while `now - timestamp` is strictly below the TTL.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let ttl = TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);
        now.signed_duration_since(self.timestamp) < ttl
    }
}

/// Read-through cache of the whole post list under one key.
#[derive(Clone)]
pub struct PostsCache {
    store: Arc<dyn KeyValueStore>,
    key: String,
    ttl: Duration,
}

impl PostsCache {
    pub fn new(store: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        Self {
            store,
            key: POSTS_CACHE_KEY.to_string(),
            ttl,
        }
    }

    /// Stored envelope, or None when absent, unreadable, or malformed.
    pub fn read_envelope(&self) -> Option<CacheEnvelope> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "posts cache read failed");
                return None;
            }
        };

        match serde_json::from_str::<CacheEnvelope>(&raw) {
            Ok(envelope) => Some(envelope),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring malformed posts cache");
                None
            }
        }
    }

    /// Cached posts in store order, if the snapshot is still fresh.
    pub fn read_fresh(&self, now: DateTime<Utc>) -> Option<Vec<Post>> {
        let envelope = self.read_envelope()?;
        if envelope.is_fresh(now, self.ttl) {
            Some(envelope.posts)
        } else {
            tracing::debug!(cached_at = %envelope.timestamp, "posts cache is stale");
            None
        }
    }

    /// Persist a fresh snapshot. Returns whether the write landed.
    pub fn write(&self, posts: &[Post], now: DateTime<Utc>) -> bool {
        let envelope = EnvelopeRef {
            timestamp: now,
            posts,
        };

        let result = serde_json::to_string(&envelope)
            .map_err(Into::into)
            .and_then(|json| self.store.set(&self.key, &json));

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "posts cache write failed");
                false
            }
        }
    }
}
