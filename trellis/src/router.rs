//! # Router
//!
//! Owns every route table and the global middleware list.
//!
//! Resolution consults, in order:
//!
//! 1. the static table, for parameter-free routes
//! 2. the route cache, for earlier trie resolutions
//! 3. the trie, caching whatever it finds
//!
//! Registration takes `&mut self`; resolution and dispatch take `&self` and
//! only touch the cache mutex for bookkeeping.

use crate::{config::RouterConfig, group::Scope, stats::RouterStats};
use parking_lot::Mutex;
use std::sync::Arc;
use trellis_core::{
    BoxHandler, BoxMiddleware, ConfigError, Method, MethodSet, Middleware, Params,
    RegistrationError, RoutingError, TrellisError,
};
use trellis_std::{
    guard::{ControllerRegistry, FunctionRegistry, HandlerValidator, IntoHandlerSpec},
    path,
    routing::{RouteCache, RouteTrie, StaticRoutes, is_static, route_key},
};

/// What the trie stores for one method and pattern.
#[derive(Clone)]
struct Route {
    handler: BoxHandler,
    middlewares: Arc<[BoxMiddleware]>,
}

impl Route {
    fn entry(&self, params: Params) -> RouteEntry {
        RouteEntry {
            handler: self.handler.clone(),
            middlewares: self.middlewares.clone(),
            params,
        }
    }
}

/// A resolved route: handler, route-level middleware, bound parameters.
///
/// The middleware list is the group-inherited middleware followed by the
/// route's own; global middleware is not included.
#[derive(Clone)]
pub struct RouteEntry {
    pub(crate) handler: BoxHandler,
    pub(crate) middlewares: Arc<[BoxMiddleware]>,
    pub(crate) params: Params,
}

impl RouteEntry {
    /// The terminal handler.
    pub fn handler(&self) -> &BoxHandler {
        &self.handler
    }

    /// Group and route middleware, outermost first.
    pub fn middlewares(&self) -> &[BoxMiddleware] {
        &self.middlewares
    }

    /// Parameters bound by the match.
    pub fn params(&self) -> &Params {
        &self.params
    }
}

impl std::fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteEntry")
            .field("middlewares", &self.middlewares.len())
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// The request router.
///
/// # Example
///
/// ```rust
/// use trellis::prelude::*;
///
/// # fn main() -> Result<(), TrellisError> {
/// let mut router = Router::new();
/// router.get("/user/:id", handler_fn(|ctx, _res| {
///     format!("user {}", ctx.param("id").unwrap_or_default())
/// }))?;
///
/// let res = router.dispatch("GET", "//user/42/", Default::default())?;
/// assert_eq!(res.body().to_string(), "user 42");
/// # Ok(())
/// # }
/// ```
pub struct Router {
    config: RouterConfig,
    trie: RouteTrie<Route>,
    statics: StaticRoutes<RouteEntry>,
    cache: Mutex<RouteCache<RouteEntry>>,
    pub(crate) middlewares: Vec<BoxMiddleware>,
    controllers: ControllerRegistry,
    functions: FunctionRegistry,
    routes: Vec<(Method, String)>,
    root: Scope,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Create a router with the default configuration.
    pub fn new() -> Self {
        Self::build(RouterConfig::default())
    }

    /// Create a router from a configuration.
    ///
    /// The configuration is validated first; an invalid one is rejected
    /// rather than failing later at request time.
    pub fn with_config(config: RouterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: RouterConfig) -> Self {
        Self {
            cache: Mutex::new(RouteCache::new(config.cache_limit)),
            config,
            trie: RouteTrie::new(),
            statics: StaticRoutes::new(),
            middlewares: Vec::new(),
            controllers: ControllerRegistry::new(),
            functions: FunctionRegistry::new(),
            routes: Vec::new(),
            root: Scope::root(),
        }
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// The active configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Change the cache limit, evicting the oldest entries if it shrinks.
    pub fn set_cache_limit(&mut self, limit: usize) -> &mut Self {
        self.config.cache_limit = limit;
        self.cache.get_mut().set_limit(limit);
        self
    }

    /// Change the maximum parameter length.
    ///
    /// Zero is rejected and leaves the configuration unchanged. Cached
    /// resolutions were checked against the old limit, so the cache is
    /// cleared.
    pub fn set_max_param_length(&mut self, limit: usize) -> Result<&mut Self, ConfigError> {
        let candidate = RouterConfig {
            max_param_length: limit,
            ..self.config.clone()
        };
        candidate.validate()?;
        self.config = candidate;
        self.cache.get_mut().clear();
        Ok(self)
    }

    /// Replace the controller namespace allow-list.
    ///
    /// Applies to routes registered afterwards. A blank namespace is
    /// rejected and leaves the configuration unchanged.
    pub fn set_allowed_namespaces<I, S>(&mut self, namespaces: I) -> Result<&mut Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let candidate = RouterConfig {
            allowed_namespaces: namespaces.into_iter().map(Into::into).collect(),
            ..self.config.clone()
        };
        candidate.validate()?;
        self.config = candidate;
        Ok(self)
    }

    /// Controllers that action handlers resolve against.
    pub fn controllers_mut(&mut self) -> &mut ControllerRegistry {
        &mut self.controllers
    }

    /// Functions that named handlers resolve against.
    pub fn functions_mut(&mut self) -> &mut FunctionRegistry {
        &mut self.functions
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Append a global middleware. Global middleware wraps every route, in
    /// the order it was added.
    pub fn use_middleware(&mut self, middleware: impl Middleware) -> &mut Self {
        self.middlewares.push(Arc::new(middleware));
        self
    }

    /// Append an already erased global middleware.
    pub fn use_boxed(&mut self, middleware: BoxMiddleware) -> &mut Self {
        self.middlewares.push(middleware);
        self
    }

    pub(crate) fn root_scope(&self) -> &Scope {
        &self.root
    }

    /// Validate and store one route. `middlewares` is already merged
    /// (group-inherited first).
    pub(crate) fn insert_route(
        &mut self,
        method: Method,
        raw_path: &str,
        handler: impl IntoHandlerSpec,
        middlewares: Vec<BoxMiddleware>,
    ) -> Result<(), TrellisError> {
        let path = path::normalize(raw_path).map_err(RegistrationError::from)?;
        let handler = HandlerValidator::new(
            &self.controllers,
            &self.functions,
            &self.config.allowed_namespaces,
        )
        .validate(handler.into_handler_spec())?;

        let route = Route {
            handler,
            middlewares: middlewares.into(),
        };
        let replaced = self.trie.insert(method, &path, route.clone())?;
        let fast = is_static(&path);
        if fast {
            self.statics.insert(method, &path, route.entry(Params::new()));
        }

        // Any cached resolution may now be shadowed.
        self.cache.get_mut().clear();

        if replaced.is_some() {
            #[cfg(feature = "tracing")]
            tracing::warn!(method = %method, path = %path, "route replaced");
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(method = %method, path = %path, is_static = fast, "route registered");
            self.routes.push((method, path));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------

    /// Resolve a canonical path, populating the cache on a trie hit.
    pub(crate) fn resolve(
        &self,
        method: Method,
        path: &str,
    ) -> Result<Option<RouteEntry>, RoutingError> {
        if let Some(entry) = self.statics.get(method, path) {
            return Ok(Some(entry.clone()));
        }

        let key = route_key(method, path);
        if let Some(entry) = self.cache.lock().get(&key) {
            return Ok(Some(entry));
        }

        let Some(found) = self
            .trie
            .lookup(method, path, self.config.max_param_length)?
        else {
            return Ok(None);
        };
        let entry = found.value.entry(found.params);
        self.cache.lock().insert(key, entry.clone());
        Ok(Some(entry))
    }

    /// Resolve a canonical path without touching the cache order.
    fn peek(&self, method: Method, path: &str) -> Result<Option<RouteEntry>, RoutingError> {
        if let Some(entry) = self.statics.get(method, path) {
            return Ok(Some(entry.clone()));
        }
        if let Some(entry) = self.cache.lock().peek(&route_key(method, path)) {
            return Ok(Some(entry.clone()));
        }
        Ok(self
            .trie
            .lookup(method, path, self.config.max_param_length)?
            .map(|found| found.value.entry(found.params)))
    }

    /// Look a route up without running it and without side effects.
    ///
    /// `HEAD` falls back to the `GET` route. A path that matches nothing is
    /// `Ok(None)`; malformed input is still an error.
    pub fn find_route(&self, method: &str, path: &str) -> Result<Option<RouteEntry>, RoutingError> {
        let method = Method::resolve(method)?;
        let path = path::normalize(path)?;
        match self.peek(method, &path)? {
            Some(entry) => Ok(Some(entry)),
            None if method == Method::Head => self.peek(method.lookup(), &path),
            None => Ok(None),
        }
    }

    /// Methods an `OPTIONS` request on `path` would advertise.
    ///
    /// `HEAD` is included whenever `GET` is; `OPTIONS` always is.
    pub fn allowed_methods(&self, path: &str) -> Result<MethodSet, RoutingError> {
        let path = path::normalize(path)?;
        self.allowed_at(&path)
    }

    /// Lookup errors such as an over-long parameter are surfaced, not
    /// treated as a missing method.
    pub(crate) fn allowed_at(&self, path: &str) -> Result<MethodSet, RoutingError> {
        let mut allowed = MethodSet::empty();
        for method in Method::ALL {
            if self.peek(method, path)?.is_some() {
                allowed |= MethodSet::from(method);
            }
        }
        if allowed.contains(MethodSet::GET) {
            allowed |= MethodSet::HEAD;
        }
        Ok(allowed | MethodSet::OPTIONS)
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Registered `(method, pattern)` pairs, in registration order.
    pub fn routes(&self) -> &[(Method, String)] {
        &self.routes
    }

    /// Drop every cached resolution. Routes and middleware are untouched.
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
        #[cfg(feature = "tracing")]
        tracing::debug!("route cache cleared");
    }

    /// Current counters.
    pub fn stats(&self) -> RouterStats {
        RouterStats {
            static_routes: self.statics.len(),
            total_routes: self.trie.len(),
            cached_routes: self.cache.lock().len(),
            cache_limit: self.config.cache_limit,
            global_middlewares: self.middlewares.len(),
        }
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("routes", &self.routes)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RouteRegistrar;
    use trellis_core::{RequestContext, Response, handler_fn};

    fn ok(_: &mut RequestContext, _: Response) -> &'static str {
        "ok"
    }

    #[test]
    fn test_router_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Router>();
    }

    #[test]
    fn test_static_route_skips_cache() {
        let mut router = Router::new();
        router.get("/health", ok).unwrap();

        let entry = router.resolve(Method::Get, "/health").unwrap();
        assert!(entry.is_some());
        assert_eq!(router.stats().cached_routes, 0);
        assert_eq!(router.stats().static_routes, 1);
    }

    #[test]
    fn test_dynamic_route_cached_once() {
        let mut router = Router::new();
        router.get("/user/:id", ok).unwrap();

        for _ in 0..3 {
            let entry = router.resolve(Method::Get, "/user/7").unwrap().unwrap();
            assert_eq!(entry.params().get("id"), Some("7"));
        }
        assert_eq!(router.stats().cached_routes, 1);
    }

    #[test]
    fn test_find_route_has_no_side_effects() {
        let mut router = Router::new();
        router.get("/user/:id", ok).unwrap();

        let entry = router.find_route("get", "/user/9/").unwrap().unwrap();
        assert_eq!(entry.params().get("id"), Some("9"));
        assert_eq!(router.stats().cached_routes, 0);
        assert!(router.find_route("GET", "/nope").unwrap().is_none());
    }

    #[test]
    fn test_find_route_head_falls_back_to_get() {
        let mut router = Router::new();
        router.get("/", ok).unwrap();
        assert!(router.find_route("HEAD", "/").unwrap().is_some());
        assert!(router.find_route("POST", "/").unwrap().is_none());
    }

    #[test]
    fn test_reregistration_replaces_and_invalidates() {
        let mut router = Router::new();
        router.get("/item/:id", handler_fn(|_, _| "old")).unwrap();
        router.resolve(Method::Get, "/item/1").unwrap();
        assert_eq!(router.stats().cached_routes, 1);

        router.get("/item/:id", handler_fn(|_, _| "new")).unwrap();
        assert_eq!(router.stats().cached_routes, 0);
        assert_eq!(router.routes().len(), 1);
        assert_eq!(router.stats().total_routes, 1);
    }

    #[test]
    fn test_shrinking_cache_limit_evicts() {
        let mut router = Router::new();
        router.get("/n/:n", ok).unwrap();
        for n in 0..10 {
            router.resolve(Method::Get, &format!("/n/{n}")).unwrap();
        }
        router.set_cache_limit(3);
        assert_eq!(router.stats().cached_routes, 3);
        assert_eq!(router.stats().cache_limit, 3);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let zero = RouterConfig::default().max_param_length(0);
        assert!(matches!(Router::with_config(zero), Err(ConfigError::Invalid(_))));

        let blank = RouterConfig::default().allowed_namespaces(["app::", " "]);
        assert!(matches!(Router::with_config(blank), Err(ConfigError::Invalid(_))));

        let router = Router::with_config(RouterConfig::default().max_param_length(8)).unwrap();
        assert_eq!(router.config().max_param_length, 8);
    }

    #[test]
    fn test_with_config_error_converts_to_trellis_error() {
        fn build() -> Result<Router, TrellisError> {
            Ok(Router::with_config(RouterConfig::default().max_param_length(0))?)
        }
        assert!(matches!(build(), Err(TrellisError::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn test_setters_reject_invalid_and_keep_config() {
        let mut router = Router::new();
        router.get("/user/:id", ok).unwrap();
        let before = router.config().clone();

        assert!(matches!(router.set_max_param_length(0), Err(ConfigError::Invalid(_))));
        assert!(matches!(router.set_allowed_namespaces([""]), Err(ConfigError::Invalid(_))));
        assert_eq!(router.config(), &before);
        assert!(router.resolve(Method::Get, "/user/1").unwrap().is_some());

        router.set_max_param_length(4).unwrap();
        assert_eq!(router.config().max_param_length, 4);
        assert!(router.resolve(Method::Get, "/user/12345").is_err());
    }

    #[test]
    fn test_allowed_methods() {
        let mut router = Router::new();
        router.get("/a", ok).unwrap();
        router.post("/a", ok).unwrap();
        let allowed = router.allowed_methods("/a/").unwrap();
        assert_eq!(allowed.allow_header(), "GET, POST, HEAD, OPTIONS");
        assert_eq!(router.allowed_methods("/b").unwrap(), MethodSet::OPTIONS);
    }
}
