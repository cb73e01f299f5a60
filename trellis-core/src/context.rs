//! Per-dispatch request state.
//!
//! A [`RequestContext`] is created once per dispatch call and handed by
//! mutable reference down the middleware chain. Method, path and route
//! parameters are fixed at creation; the `data` bag is free for middleware
//! and handlers to read and write.

use crate::method::Method;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;

/// Route parameters bound while matching, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    inner: IndexMap<String, String>,
}

impl Params {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any earlier binding.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(name.into(), value.into());
    }

    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).map(String::as_str)
    }

    /// Iterate over `(name, value)` pairs in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of bound parameters.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Mutable state shared by every link of one dispatch.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    path: String,
    params: Params,
    data: HashMap<String, Value>,
}

impl RequestContext {
    /// Create a context for a resolved request.
    ///
    /// `method` is the method as requested (a `HEAD` stays `HEAD`), `path` is
    /// the normalized path.
    pub fn new(
        method: Method,
        path: impl Into<String>,
        params: Params,
        data: HashMap<String, Value>,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            params,
            data,
        }
    }

    /// The requested method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The normalized request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// All route parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// A single route parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// The free-form data bag.
    pub fn data(&self) -> &HashMap<String, Value> {
        &self.data
    }

    /// Mutable access to the data bag.
    pub fn data_mut(&mut self) -> &mut HashMap<String, Value> {
        &mut self.data
    }

    /// Read one entry from the data bag.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Store one entry in the data bag, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.data.insert(key.into(), value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_lookup() {
        let params: Params = [("id", "123"), ("slug", "hello")].into_iter().collect();
        assert_eq!(params.get("id"), Some("123"));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.len(), 2);
        let names: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["id", "slug"]);
    }

    #[test]
    fn test_data_bag_is_mutable() {
        let mut ctx = RequestContext::new(Method::Head, "/x", Params::new(), HashMap::new());
        assert_eq!(ctx.insert("user", "alice"), None);
        assert_eq!(ctx.get("user"), Some(&Value::from("alice")));
        ctx.data_mut().remove("user");
        assert!(ctx.data().is_empty());
        assert_eq!(ctx.method(), Method::Head);
    }
}
