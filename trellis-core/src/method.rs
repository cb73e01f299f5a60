//! HTTP method resolution.
//!
//! The router accepts exactly seven methods. Raw method strings are matched
//! case-insensitively and anything else is rejected with
//! [`RoutingError::InvalidMethod`].
//!
//! Two methods carry extra dispatch policy:
//!
//! - `HEAD` is looked up as `GET` (see [`Method::lookup`]); the dispatcher
//!   strips the body afterwards.
//! - `OPTIONS` without an explicit route is answered with a synthesized
//!   `Allow` listing built from a [`MethodSet`].

use crate::error::RoutingError;
use bitflags::bitflags;
use std::fmt;
use std::str::FromStr;

/// One of the seven supported HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
    /// `PATCH`
    Patch,
    /// `OPTIONS`
    Options,
    /// `HEAD`
    Head,
}

impl Method {
    /// All supported methods, in canonical order.
    pub const ALL: [Method; 7] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Delete,
        Method::Patch,
        Method::Options,
        Method::Head,
    ];

    /// Resolve a raw method string, ignoring ASCII case.
    pub fn resolve(raw: &str) -> Result<Self, RoutingError> {
        let method = match raw.to_ascii_uppercase().as_str() {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "PATCH" => Method::Patch,
            "OPTIONS" => Method::Options,
            "HEAD" => Method::Head,
            _ => return Err(RoutingError::InvalidMethod(raw.to_string())),
        };
        Ok(method)
    }

    /// The canonical uppercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Options => "OPTIONS",
            Method::Head => "HEAD",
        }
    }

    /// The method used for trie, table and cache lookup.
    ///
    /// `HEAD` is served by whatever answers `GET` at the same path.
    pub const fn lookup(self) -> Self {
        match self {
            Method::Head => Method::Get,
            other => other,
        }
    }

    /// The flag for this method inside a [`MethodSet`].
    pub const fn flag(self) -> MethodSet {
        match self {
            Method::Get => MethodSet::GET,
            Method::Post => MethodSet::POST,
            Method::Put => MethodSet::PUT,
            Method::Delete => MethodSet::DELETE,
            Method::Patch => MethodSet::PATCH,
            Method::Options => MethodSet::OPTIONS,
            Method::Head => MethodSet::HEAD,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::resolve(s)
    }
}

bitflags! {
    /// A deduplicated set of methods, used to build `Allow` headers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MethodSet: u8 {
        /// `GET`
        const GET = 1 << 0;
        /// `POST`
        const POST = 1 << 1;
        /// `PUT`
        const PUT = 1 << 2;
        /// `DELETE`
        const DELETE = 1 << 3;
        /// `PATCH`
        const PATCH = 1 << 4;
        /// `OPTIONS`
        const OPTIONS = 1 << 5;
        /// `HEAD`
        const HEAD = 1 << 6;
    }
}

impl MethodSet {
    /// Iterate over the contained methods in canonical order.
    pub fn methods(self) -> impl Iterator<Item = Method> {
        Method::ALL
            .into_iter()
            .filter(move |m| self.contains(m.flag()))
    }

    /// Render the set as an `Allow` header value, e.g. `GET, POST, HEAD, OPTIONS`.
    ///
    /// `HEAD` and `OPTIONS` are listed last.
    pub fn allow_header(self) -> String {
        const ORDER: [Method; 7] = [
            Method::Get,
            Method::Post,
            Method::Put,
            Method::Delete,
            Method::Patch,
            Method::Head,
            Method::Options,
        ];
        ORDER
            .iter()
            .filter(|m| self.contains(m.flag()))
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl From<Method> for MethodSet {
    fn from(method: Method) -> Self {
        method.flag()
    }
}

impl FromIterator<Method> for MethodSet {
    fn from_iter<I: IntoIterator<Item = Method>>(iter: I) -> Self {
        iter.into_iter()
            .fold(MethodSet::empty(), |set, m| set | m.flag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("get", Method::Get)]
    #[case("Post", Method::Post)]
    #[case("PUT", Method::Put)]
    #[case("delete", Method::Delete)]
    #[case("pAtCh", Method::Patch)]
    #[case("options", Method::Options)]
    #[case("head", Method::Head)]
    fn test_resolve_any_case(#[case] raw: &str, #[case] expected: Method) {
        assert_eq!(Method::resolve(raw), Ok(expected));
    }

    #[rstest]
    #[case("TRACE")]
    #[case("CONNECT")]
    #[case("")]
    #[case("GET ")]
    fn test_resolve_rejects(#[case] raw: &str) {
        assert_eq!(
            Method::resolve(raw),
            Err(RoutingError::InvalidMethod(raw.to_string()))
        );
    }

    #[test]
    fn test_head_looks_up_get() {
        assert_eq!(Method::Head.lookup(), Method::Get);
        assert_eq!(Method::Post.lookup(), Method::Post);
        assert_eq!(Method::Options.lookup(), Method::Options);
    }

    #[test]
    fn test_allow_header_dedup_and_order() {
        let set: MethodSet = [Method::Post, Method::Options, Method::Get, Method::Head, Method::Get]
            .into_iter()
            .collect();
        assert_eq!(set.allow_header(), "GET, POST, HEAD, OPTIONS");
        assert_eq!(set.methods().count(), 4);
    }

    #[test]
    fn test_exactly_seven_methods() {
        let all: MethodSet = Method::ALL.into_iter().collect();
        assert_eq!(all, MethodSet::all());
        assert_eq!(all.bits().count_ones(), 7);
    }
}
