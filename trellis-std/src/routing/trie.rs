//! Segment trie for parameterized route matching.
//!
//! Each edge is one path segment. A node has any number of literal children
//! and at most one parameter child (`:name` or `{name}`), so lookup is
//! O(number of segments).
//!
//! # Matching Rules
//!
//! - At every level a literal child is preferred over the parameter child.
//!   The walk is greedy and does not backtrack: once a literal is taken, the
//!   parameter branch at that level is not revisited.
//! - A parameter segment longer than the configured limit fails the lookup
//!   with [`RoutingError::ParameterTooLong`].
//! - Running out of children is a plain "no match" (`Ok(None)`).
//!
//! # Example
//!
//! ```rust
//! use trellis_core::Method;
//! use trellis_std::routing::RouteTrie;
//!
//! let mut trie: RouteTrie<&str> = RouteTrie::new();
//! trie.insert(Method::Get, "/user/:id", "show").unwrap();
//! trie.insert(Method::Get, "/user/me", "me").unwrap();
//!
//! let hit = trie.lookup(Method::Get, "/user/42", 64).unwrap().unwrap();
//! assert_eq!(*hit.value, "show");
//! assert_eq!(hit.params.get("id"), Some("42"));
//!
//! let hit = trie.lookup(Method::Get, "/user/me", 64).unwrap().unwrap();
//! assert_eq!(*hit.value, "me");
//! ```

use crate::path::segments;
use std::collections::HashMap;
use trellis_core::{Method, Params, RegistrationError, RoutingError};

/// One parsed segment of a route pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Matches exactly this text.
    Literal(&'a str),
    /// Matches any single segment and binds it to this name.
    Param(&'a str),
}

impl<'a> Segment<'a> {
    /// Parse one pattern segment. `:id` and `{id}` are parameters.
    pub fn parse(raw: &'a str) -> Self {
        if let Some(name) = raw.strip_prefix(':').filter(|n| !n.is_empty()) {
            return Segment::Param(name);
        }
        if let Some(name) = raw
            .strip_prefix('{')
            .and_then(|r| r.strip_suffix('}'))
            .filter(|n| !n.is_empty())
        {
            return Segment::Param(name);
        }
        Segment::Literal(raw)
    }
}

/// Returns `true` if the canonical pattern has no parameter segments.
pub fn is_static(path: &str) -> bool {
    segments(path).all(|s| matches!(Segment::parse(s), Segment::Literal(_)))
}

/// The parameter edge out of a node.
#[derive(Debug)]
struct ParamEdge<V> {
    name: String,
    node: TrieNode<V>,
}

/// A node in the trie.
#[derive(Debug)]
struct TrieNode<V> {
    /// Literal children, keyed by exact segment text.
    children: HashMap<String, TrieNode<V>>,
    /// The single parameter child, created on first use.
    param: Option<Box<ParamEdge<V>>>,
    /// The route ending here (if this is a terminal node).
    value: Option<V>,
}

impl<V> Default for TrieNode<V> {
    fn default() -> Self {
        Self {
            children: HashMap::new(),
            param: None,
            value: None,
        }
    }
}

/// A successful trie lookup.
#[derive(Debug)]
pub struct TrieMatch<'a, V> {
    /// The route stored at the terminal node.
    pub value: &'a V,
    /// Every parameter consumed along the way.
    pub params: Params,
}

/// A segment trie keyed by method, storing one `V` per method and pattern.
#[derive(Debug)]
pub struct RouteTrie<V> {
    roots: HashMap<Method, TrieNode<V>>,
    size: usize,
}

impl<V> Default for RouteTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RouteTrie<V> {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self {
            roots: HashMap::new(),
            size: 0,
        }
    }

    /// Insert a route under a canonical pattern.
    ///
    /// Returns the previous value if the same method and pattern were already
    /// registered. Binding a different parameter name at a position that
    /// already has one is rejected.
    pub fn insert(&mut self, method: Method, path: &str, value: V) -> Result<Option<V>, RegistrationError> {
        let mut node = self.roots.entry(method).or_default();

        for raw in segments(path) {
            node = match Segment::parse(raw) {
                Segment::Literal(lit) => node.children.entry(lit.to_string()).or_default(),
                Segment::Param(name) => {
                    let edge = node.param.get_or_insert_with(|| {
                        Box::new(ParamEdge {
                            name: name.to_string(),
                            node: TrieNode::default(),
                        })
                    });
                    if edge.name != name {
                        return Err(RegistrationError::ConflictingParameter {
                            path: path.to_string(),
                            existing: edge.name.clone(),
                            requested: name.to_string(),
                        });
                    }
                    &mut edge.node
                }
            };
        }

        let old = node.value.replace(value);
        if old.is_none() {
            self.size += 1;
        }
        Ok(old)
    }

    /// Resolve a canonical request path.
    pub fn lookup(
        &self,
        method: Method,
        path: &str,
        max_param_length: usize,
    ) -> Result<Option<TrieMatch<'_, V>>, RoutingError> {
        let Some(mut node) = self.roots.get(&method) else {
            return Ok(None);
        };
        let mut params = Params::new();

        for seg in segments(path) {
            if let Some(child) = node.children.get(seg) {
                node = child;
                continue;
            }
            let Some(edge) = node.param.as_deref() else {
                return Ok(None);
            };
            if seg.len() > max_param_length {
                return Err(RoutingError::ParameterTooLong {
                    name: edge.name.clone(),
                    limit: max_param_length,
                    actual: seg.len(),
                });
            }
            params.insert(edge.name.as_str(), seg);
            node = &edge.node;
        }

        Ok(node.value.as_ref().map(|value| TrieMatch { value, params }))
    }

    /// Number of registered routes across all methods.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if no route is registered.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

// ============================================================================
// Tests
// ============================================================================
