//! Exact-match table for parameter-free routes.
//!
//! Populated alongside the trie for every static pattern; lookup is one hash
//! probe on `"METHOD::path"`. It must always agree with what the trie returns
//! for the same input, so it is only ever written through the same
//! registration call.

use std::collections::HashMap;
use trellis_core::Method;

/// Build the `"METHOD::path"` key shared by the static table and the cache.
pub fn route_key(method: Method, path: &str) -> String {
    format!("{}::{}", method.as_str(), path)
}

/// Static routes keyed by `"METHOD::path"`.
#[derive(Debug)]
pub struct StaticRoutes<V> {
    map: HashMap<String, V>,
}

impl<V> Default for StaticRoutes<V> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}

impl<V> StaticRoutes<V> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a static route.
    pub fn insert(&mut self, method: Method, path: &str, value: V) -> Option<V> {
        self.map.insert(route_key(method, path), value)
    }

    /// Exact lookup.
    pub fn get(&self, method: Method, path: &str) -> Option<&V> {
        self.map.get(&route_key(method, path))
    }

    /// Number of static routes.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
