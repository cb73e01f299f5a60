//! Bounded LRU cache of resolved routes.
//!
//! Entries are kept in an [`IndexMap`] ordered from least to most recently
//! used. A hit moves the entry to the back; inserting past the limit evicts
//! from the front. A limit of `0` disables caching.

use indexmap::IndexMap;

/// Default number of cached resolutions.
pub const DEFAULT_CACHE_LIMIT: usize = 1000;

/// A bounded, least-recently-used map from lookup key to resolved route.
#[derive(Debug)]
pub struct RouteCache<V> {
    entries: IndexMap<String, V>,
    limit: usize,
}

impl<V> Default for RouteCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_LIMIT)
    }
}

impl<V: Clone> RouteCache<V> {
    /// Fetch an entry and mark it most recently used.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let Some(index) = self.entries.get_index_of(key) else {
            #[cfg(feature = "tracing")]
            tracing::trace!(key, "route cache miss");
            return None;
        };
        let last = self.entries.len() - 1;
        self.entries.move_index(index, last);
        #[cfg(feature = "tracing")]
        tracing::trace!(key, "route cache hit");
        self.entries.get_index(last).map(|(_, v)| v.clone())
    }
}

impl<V> RouteCache<V> {
    /// Create an empty cache holding at most `limit` entries.
    pub fn new(limit: usize) -> Self {
        Self {
            entries: IndexMap::new(),
            limit,
        }
    }

    /// Look at an entry without touching its recency.
    pub fn peek(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    /// Insert an entry as most recently used, evicting the oldest on overflow.
    pub fn insert(&mut self, key: String, value: V) {
        if self.limit == 0 {
            return;
        }
        self.entries.shift_remove(&key);
        self.entries.insert(key, value);
        self.evict_overflow();
    }

    /// Change the limit, evicting immediately if the cache is now too large.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        self.evict_overflow();
    }

    /// The configured limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys from least to most recently used.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn evict_overflow(&mut self) {
        while self.entries.len() > self.limit {
            let Some((key, _)) = self.entries.shift_remove_index(0) else {
                break;
            };
            #[cfg(feature = "tracing")]
            tracing::trace!(key = %key, "route cache eviction");
        }
    }
}
