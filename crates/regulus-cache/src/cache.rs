//! Core TTL cache implementation

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::interval;

use crate::CacheConfig;

/// One stored value with its expiry bookkeeping
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    data: V,
    stored_at: Instant,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.stored_at) > self.ttl
    }
}

#[derive(Debug)]
struct CacheState<V> {
    entries: HashMap<String, CacheEntry<V>>,
    sweeper: Option<JoinHandle<()>>,
}

/// Observability snapshot of a cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of entries currently held (live or not-yet-swept)
    pub size: usize,

    /// Configured size cap
    pub max_entries: usize,

    /// Keys currently held
    pub keys: Vec<String>,
}

/// Generic TTL key/value store with bounded size
///
/// Cloning is cheap and clones share state, so one constructed instance can
/// be handed to every caller in the process. All operations take `&self`;
/// the map is guarded internally.
///
/// # Examples
///
/// ```
/// use regulus_cache::{CacheConfig, TtlCache};
///
/// let cache: TtlCache<u64> = TtlCache::new(CacheConfig::default());
/// cache.set("answer", 42);
/// assert_eq!(cache.get("answer"), Some(42));
///
/// cache.remove("answer");
/// assert_eq!(cache.get("answer"), None);
/// ```
#[derive(Debug)]
pub struct TtlCache<V> {
    config: CacheConfig,
    state: Arc<Mutex<CacheState<V>>>,
}

impl<V> Clone for TtlCache<V> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache with the given configuration
    ///
    /// No background work starts here; see [`TtlCache::start_sweeper`].
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            state: Arc::new(Mutex::new(CacheState {
                entries: HashMap::new(),
                sweeper: None,
            })),
        }
    }

    /// Create a cache with the default configuration
    pub fn default_config() -> Self {
        Self::new(CacheConfig::default())
    }

    // Every critical section is a plain map operation, so a poisoned lock
    // cannot be holding a broken invariant; recover instead of panicking.
    fn lock(&self) -> MutexGuard<'_, CacheState<V>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a live value by key
    ///
    /// Absent and expired keys both yield `None`; an expired entry is
    /// evicted on the spot. Returns a clone - the cache never hands out
    /// references into its own storage.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut state = self.lock();
        let expired = match state.entries.get(key) {
            Some(entry) => entry.is_expired(Instant::now()),
            None => return None,
        };

        if expired {
            state.entries.remove(key);
            return None;
        }

        state.entries.get(key).map(|entry| entry.data.clone())
    }

    /// Store a value under the default TTL, overwriting unconditionally
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.set_with_ttl(key, value, self.config.default_ttl());
    }

    /// Store a value with an explicit TTL, overwriting unconditionally
    ///
    /// Inserting a new key at the size cap first evicts the oldest tenth of
    /// entries by insertion time. Overwriting an existing key never evicts -
    /// the map does not grow.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        let mut state = self.lock();

        if state.entries.len() >= self.config.max_entries && !state.entries.contains_key(&key) {
            let batch = self.config.eviction_batch();
            let mut by_age: Vec<(String, Instant)> = state
                .entries
                .iter()
                .map(|(k, e)| (k.clone(), e.stored_at))
                .collect();
            by_age.sort_by_key(|(_, stored_at)| *stored_at);
            for (old_key, _) in by_age.into_iter().take(batch) {
                state.entries.remove(&old_key);
            }
            tracing::debug!("cache at capacity, evicted {} oldest entries", batch);
        }

        state.entries.insert(
            key,
            CacheEntry {
                data: value,
                stored_at: Instant::now(),
                ttl,
            },
        );
    }

    /// Remove a key; returns whether it was present
    pub fn remove(&self, key: &str) -> bool {
        self.lock().entries.remove(key).is_some()
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    /// Get-or-compute-and-set, single attempt
    ///
    /// On a miss the producer runs once; its value is stored under `ttl`
    /// (the configured default when `None`) and returned. A producer error
    /// propagates and nothing is cached - failures are never memoized.
    pub fn cached<E>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        producer: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(hit) = self.get(key) {
            return Ok(hit);
        }

        let value = producer()?;
        self.set_with_ttl(key, value.clone(), ttl.unwrap_or_else(|| self.config.default_ttl()));
        Ok(value)
    }

    /// Remove every expired entry, returning how many were dropped
    ///
    /// This is the same cleanup the background sweeper performs; it is
    /// public so hosts without a runtime can sweep on their own schedule.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut state = self.lock();
        let before = state.entries.len();
        state.entries.retain(|_, entry| !entry.is_expired(now));
        before - state.entries.len()
    }

    /// Snapshot of current size and keys
    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        CacheStats {
            size: state.entries.len(),
            max_entries: self.config.max_entries,
            keys: state.entries.keys().cloned().collect(),
        }
    }

    /// Stop the sweeper (if running) and drop every entry
    ///
    /// Call once on shutdown. The cache remains usable afterwards, merely
    /// empty and unswept.
    pub fn destroy(&self) {
        let mut state = self.lock();
        if let Some(handle) = state.sweeper.take() {
            handle.abort();
        }
        state.entries.clear();
    }
}

impl<V: Clone + Send + 'static> TtlCache<V> {
    /// Start the background sweep task
    ///
    /// Runs [`TtlCache::sweep`] every `sweep_interval`. Idempotent - a
    /// second call while a sweeper is running does nothing. Requires a tokio
    /// runtime; stop it via [`TtlCache::destroy`].
    pub fn start_sweeper(&self) {
        let mut state = self.lock();
        if state.sweeper.is_some() {
            return;
        }

        let cache = self.clone();
        // interval() panics on a zero period
        let period = self.config.sweep_interval().max(Duration::from_millis(1));
        state.sweeper = Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            loop {
                ticker.tick().await;
                let removed = cache.sweep();
                if removed > 0 {
                    tracing::debug!("cache sweep removed {} expired entries", removed);
                }
            }
        }));
    }
}
