//! # Route Storage
//!
//! The three structures a router consults, in lookup order:
//!
//! | Structure | Holds | Lookup |
//! |-----------|-------|--------|
//! | [`StaticRoutes`] | parameter-free routes | one hash probe |
//! | [`RouteCache`] | earlier trie resolutions | one hash probe + LRU bookkeeping |
//! | [`RouteTrie`] | every route | one step per path segment |

pub mod cache;
pub mod table;
pub mod trie;

pub use cache::{DEFAULT_CACHE_LIMIT, RouteCache};
pub use table::{StaticRoutes, route_key};
pub use trie::{RouteTrie, Segment, TrieMatch, is_static};
