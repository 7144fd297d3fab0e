//! Regulus Cache
//!
//! A generic in-process TTL cache used to bound the cost of repeated quality
//! computations and external API calls.
//!
//! # Overview
//!
//! - **Lazy expiry**: reads treat expired-but-present entries as absent and
//!   evict them on access
//! - **Pressure eviction**: inserting a new key at the size cap first evicts
//!   the oldest tenth of entries by insertion time (FIFO-ish, not LRU)
//! - **Background sweep**: an optional scheduled task removes entries that
//!   were set and then forgotten, bounding memory even without reads
//! - **Explicit lifecycle**: construct the cache where the process wires its
//!   dependencies, hand out clones (clones share state), and call
//!   [`TtlCache::destroy`] on shutdown to stop the sweeper
//!
//! The cache knows nothing about the quality engine; composing the two is
//! the caller's job. There is no per-tenant partitioning at this layer - any
//! tenant isolation must be encoded into the key.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use regulus_cache::{CacheConfig, TtlCache};
//!
//! let cache: TtlCache<String> = TtlCache::new(CacheConfig::default());
//!
//! cache.set("greeting", "hello".to_string());
//! assert_eq!(cache.get("greeting"), Some("hello".to_string()));
//!
//! cache.set_with_ttl("blink", "gone soon".to_string(), Duration::from_millis(1));
//! std::thread::sleep(Duration::from_millis(5));
//! assert_eq!(cache.get("blink"), None);
//! ```

#![warn(missing_docs)]

mod cache;
mod config;

pub use cache::{CacheStats, TtlCache};
pub use config::CacheConfig;
