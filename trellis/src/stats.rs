//! Read-only router counters.

/// A snapshot of router sizes, taken by [`Router::stats`](crate::Router::stats).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RouterStats {
    /// Routes registered without parameter segments.
    pub static_routes: usize,
    /// Routes registered in total, static or not.
    pub total_routes: usize,
    /// Trie resolutions currently held in the route cache.
    pub cached_routes: usize,
    /// Configured cache limit.
    pub cache_limit: usize,
    /// Global middleware count.
    pub global_middlewares: usize,
}
