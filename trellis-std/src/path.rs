//! Path normalization and traversal guard.
//!
//! The same [`normalize`] runs when a route is registered and when a request
//! is resolved, so both sides always agree on the canonical form.
//!
//! Steps, in order:
//!
//! 1. Root the path (`""` → `/`, `api` → `/api`).
//! 2. Collapse every run of `/` into one.
//! 3. Trim a single trailing `/` unless the path is exactly `/`.
//! 4. Percent-decode a copy and reject it if it contains `..` or `\`.
//!
//! Normalizing an already canonical path returns it unchanged.

use percent_encoding::percent_decode_str;
use trellis_core::RoutingError;

/// Normalize a raw path, or reject it as a traversal attempt.
pub fn normalize(raw: &str) -> Result<String, RoutingError> {
    let mut out = String::with_capacity(raw.len() + 1);
    out.push('/');
    for ch in raw.chars() {
        if ch == '/' && out.ends_with('/') {
            continue;
        }
        out.push(ch);
    }
    if out.len() > 1 && out.ends_with('/') {
        out.pop();
    }

    let decoded = percent_decode_str(&out).decode_utf8_lossy();
    if decoded.contains("..") || decoded.contains('\\') {
        return Err(RoutingError::PathTraversal(raw.to_string()));
    }

    Ok(out)
}

/// Join a group prefix and a route path, then normalize the result.
pub fn join(prefix: &str, path: &str) -> Result<String, RoutingError> {
    normalize(&format!("{prefix}/{path}"))
}

/// Split a canonical path into its non-empty segments.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
