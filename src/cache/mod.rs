// Cache module for the posts snapshot.
// Key-value storage backends, cache paths, and the TTL'd envelope on top.

pub mod envelope;
pub mod paths;
pub mod store;

pub use envelope::{CacheEnvelope, DEFAULT_TTL, POSTS_CACHE_KEY, PostsCache};
pub use store::{FileStore, KeyValueStore, MemoryStore};
