//! Response value object and conversion traits.
//!
//! [`Response`] is copy-on-write: every `with_*` method returns a new value and
//! leaves the receiver untouched, so middleware holding an earlier response
//! never observes later changes.

use crate::error::BoxError;
use indexmap::IndexMap;
use std::fmt;

/// Response headers. Keys are case-sensitive.
///
/// Insertion order is kept for emission; equality ignores it.
pub type Headers = IndexMap<String, String>;

/// Generic body used when a chain link fails.
pub const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

/// An opaque response payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Body {
    /// No payload.
    #[default]
    Empty,
    /// UTF-8 text.
    Text(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// A JSON document.
    Json(serde_json::Value),
}

impl Body {
    /// Returns `true` if there is no payload.
    pub fn is_empty(&self) -> bool {
        match self {
            Body::Empty => true,
            Body::Text(s) => s.is_empty(),
            Body::Bytes(b) => b.is_empty(),
            Body::Json(_) => false,
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Empty => Ok(()),
            Body::Text(s) => f.write_str(s),
            Body::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
            Body::Json(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Body {
    fn from(s: &str) -> Self {
        Body::Text(s.to_string())
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Body::Text(s)
    }
}

impl From<Vec<u8>> for Body {
    fn from(b: Vec<u8>) -> Self {
        Body::Bytes(b)
    }
}

impl From<serde_json::Value> for Body {
    fn from(v: serde_json::Value) -> Self {
        Body::Json(v)
    }
}

/// An HTTP response produced by a handler or middleware.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    body: Body,
    status: u16,
    headers: Headers,
}

impl Default for Response {
    fn default() -> Self {
        Self::new(Body::Empty)
    }
}

impl Response {
    /// Create a 200 response with the given body.
    pub fn new(body: impl Into<Body>) -> Self {
        Self {
            body: body.into(),
            status: 200,
            headers: Headers::new(),
        }
    }

    /// An empty 200 response, the template handed to handlers.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The response substituted for a failed chain link.
    pub fn internal_error() -> Self {
        Self::new(INTERNAL_ERROR_BODY).with_status(500)
    }

    /// The payload.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// The status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// All headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Look up a header value by exact key.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    /// Copy with a different status code.
    #[must_use]
    pub fn with_status(&self, status: u16) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Copy with a different body.
    #[must_use]
    pub fn with_body(&self, body: impl Into<Body>) -> Self {
        Self {
            body: body.into(),
            ..self.clone()
        }
    }

    /// Copy with the body discarded. Status and headers are kept.
    #[must_use]
    pub fn without_body(&self) -> Self {
        self.with_body(Body::Empty)
    }

    /// Copy with a header set (replacing any previous value for `key`).
    #[must_use]
    pub fn with_header(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut headers = self.headers.clone();
        headers.insert(key.into(), value.into());
        Self {
            headers,
            ..self.clone()
        }
    }

    /// Copy with several headers set.
    #[must_use]
    pub fn with_headers<K, V>(&self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut merged = self.headers.clone();
        merged.extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        Self {
            headers: merged,
            ..self.clone()
        }
    }
}

/// Trait for converting a handler's return value into a [`Response`].
///
/// # Default Implementations
///
/// - `Response` → used verbatim
/// - `()` → empty 200
/// - `String`, `&'static str`, `Vec<u8>`, `serde_json::Value`, `Body` → 200 with that body
/// - `(u16, T)` → `T` converted, then status replaced
/// - `Result<T, E>` → delegates to `T` or propagates the error as a link failure
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be turned into a `Response`",
    label = "missing `IntoResponse` implementation",
    note = "Return a `Response`, a body-like value, or implement `IntoResponse`."
)]
pub trait IntoResponse {
    /// Convert the output into a response, or a link failure.
    fn into_response(self) -> Result<Response, BoxError>;
}

impl IntoResponse for Response {
    fn into_response(self) -> Result<Response, BoxError> {
        Ok(self)
    }
}

impl IntoResponse for () {
    fn into_response(self) -> Result<Response, BoxError> {
        Ok(Response::empty())
    }
}

impl IntoResponse for Body {
    fn into_response(self) -> Result<Response, BoxError> {
        Ok(Response::new(self))
    }
}

impl IntoResponse for String {
    fn into_response(self) -> Result<Response, BoxError> {
        Ok(Response::new(self))
    }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Result<Response, BoxError> {
        Ok(Response::new(self))
    }
}

impl IntoResponse for Vec<u8> {
    fn into_response(self) -> Result<Response, BoxError> {
        Ok(Response::new(self))
    }
}

impl IntoResponse for serde_json::Value {
    fn into_response(self) -> Result<Response, BoxError> {
        Ok(Response::new(self))
    }
}

impl<T: IntoResponse> IntoResponse for (u16, T) {
    fn into_response(self) -> Result<Response, BoxError> {
        let (status, inner) = self;
        Ok(inner.into_response()?.with_status(status))
    }
}

impl<T, E> IntoResponse for Result<T, E>
where
    T: IntoResponse,
    E: Into<BoxError>,
{
    fn into_response(self) -> Result<Response, BoxError> {
        match self {
            Ok(t) => t.into_response(),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutators_copy_on_write() {
        let original = Response::new("hello");
        let changed = original.with_status(201).with_header("X-A", "1");

        assert_eq!(original.status(), 200);
        assert!(original.headers().is_empty());
        assert_eq!(changed.status(), 201);
        assert_eq!(changed.header("X-A"), Some("1"));
        assert_eq!(changed.body(), &Body::Text("hello".into()));
    }

    #[test]
    fn test_header_equality_ignores_order() {
        let a = Response::empty().with_header("A", "1").with_header("B", "2");
        let b = Response::empty().with_header("B", "2").with_header("A", "1");
        assert_eq!(a, b);
        let keys: Vec<_> = a.headers().keys().cloned().collect();
        assert_eq!(keys, vec!["A", "B"]);
    }

    #[test]
    fn test_header_keys_case_sensitive() {
        let r = Response::empty().with_header("Allow", "GET");
        assert_eq!(r.header("allow"), None);
        assert_eq!(r.header("Allow"), Some("GET"));
    }

    #[test]
    fn test_without_body_keeps_status_and_headers() {
        let r = Response::new("payload").with_status(202).with_header("X", "y");
        let stripped = r.without_body();
        assert!(stripped.body().is_empty());
        assert_eq!(stripped.status(), 202);
        assert_eq!(stripped.header("X"), Some("y"));
    }

    #[test]
    fn test_into_response_wraps_values() {
        let r = "text".into_response().unwrap();
        assert_eq!(r.status(), 200);
        assert_eq!(r.body().to_string(), "text");

        let r = (404u16, "missing").into_response().unwrap();
        assert_eq!(r.status(), 404);

        let r = serde_json::json!({"id": 1}).into_response().unwrap();
        assert_eq!(r.body().to_string(), r#"{"id":1}"#);

        let verbatim = Response::new("x").with_status(418);
        assert_eq!(verbatim.clone().into_response().unwrap(), verbatim);
    }

    #[test]
    fn test_into_response_propagates_error() {
        let out: Result<String, std::io::Error> = Err(std::io::Error::other("boom"));
        let err = out.into_response().unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
