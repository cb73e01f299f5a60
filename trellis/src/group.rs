//! # Route Groups
//!
//! A group applies a path prefix and a middleware list to every route
//! registered inside its callback, including nested groups.
//!
//! ```rust
//! use trellis::prelude::*;
//!
//! # fn main() -> Result<(), TrellisError> {
//! let mut router = Router::new();
//! router.group("/api", vec![], |api| {
//!     api.get("/users", handler_fn(|_, _| "users"))?;
//!     api.group("/v2", vec![], |v2| {
//!         v2.get("/users", handler_fn(|_, _| "users v2"))?;
//!         Ok(())
//!     })?;
//!     Ok(())
//! })?;
//!
//! assert!(router.find_route("GET", "/api/v2/users")?.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! Scopes are immutable values: entering a group builds a new [`Scope`]
//! from the enclosing one, and nothing has to be restored on the way out,
//! even when the callback fails.

use crate::router::Router;
use trellis_core::{BoxMiddleware, Method, RegistrationError, RoutingError, TrellisError};
use trellis_std::{guard::IntoHandlerSpec, path};

/// Prefix and middleware inherited by routes in a group.
#[derive(Clone, Default)]
pub struct Scope {
    prefix: String,
    middlewares: Vec<BoxMiddleware>,
}

impl Scope {
    /// The top-level scope: no prefix, no middleware.
    pub fn root() -> Self {
        Self::default()
    }

    /// A child scope: prefixes join, middleware appends (outer first).
    pub fn nest(
        &self,
        prefix: &str,
        middlewares: impl IntoIterator<Item = BoxMiddleware>,
    ) -> Result<Self, RoutingError> {
        let prefix = path::join(&self.prefix, prefix)?;
        let mut inherited = self.middlewares.clone();
        inherited.extend(middlewares);
        Ok(Self {
            prefix,
            middlewares: inherited,
        })
    }

    /// The accumulated path prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The accumulated middleware, outermost first.
    pub fn middlewares(&self) -> &[BoxMiddleware] {
        &self.middlewares
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("prefix", &self.prefix)
            .field("middlewares", &self.middlewares.len())
            .finish()
    }
}

/// A registration handle bound to a [`Scope`].
pub struct RouteGroup<'r> {
    router: &'r mut Router,
    scope: Scope,
}

impl std::fmt::Debug for RouteGroup<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteGroup").field("scope", &self.scope).finish()
    }
}

/// Route registration, shared by [`Router`] and [`RouteGroup`].
///
/// Only [`scope`](RouteRegistrar::scope) and
/// [`router_mut`](RouteRegistrar::router_mut) are required; everything else
/// is provided.
pub trait RouteRegistrar {
    /// Scope applied to routes registered through `self`.
    fn scope(&self) -> &Scope;

    /// The router routes end up in.
    fn router_mut(&mut self) -> &mut Router;

    /// Register a route.
    ///
    /// The path is joined onto the scope prefix and normalized. `middlewares`
    /// run inside the scope's middleware.
    fn add_route(
        &mut self,
        method: Method,
        path: &str,
        handler: impl IntoHandlerSpec,
        middlewares: Vec<BoxMiddleware>,
    ) -> Result<&mut Self, TrellisError> {
        let scope = self.scope();
        let full = if scope.prefix().is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", scope.prefix(), path)
        };
        let mut merged = scope.middlewares().to_vec();
        merged.extend(middlewares);
        self.router_mut().insert_route(method, &full, handler, merged)?;
        Ok(self)
    }

    /// Register the same handler for several methods.
    fn add_methods(
        &mut self,
        methods: &[Method],
        path: &str,
        handler: impl IntoHandlerSpec,
        middlewares: Vec<BoxMiddleware>,
    ) -> Result<&mut Self, TrellisError> {
        let spec = handler.into_handler_spec();
        for &method in methods {
            self.add_route(method, path, spec.clone(), middlewares.clone())?;
        }
        Ok(self)
    }

    /// Register `GET`, `POST`, `PUT`, `DELETE` and `PATCH`.
    ///
    /// `HEAD` and `OPTIONS` are derived from these at dispatch.
    fn any(&mut self, path: &str, handler: impl IntoHandlerSpec) -> Result<&mut Self, TrellisError> {
        self.add_methods(
            &[
                Method::Get,
                Method::Post,
                Method::Put,
                Method::Delete,
                Method::Patch,
            ],
            path,
            handler,
            Vec::new(),
        )
    }

    /// Register a `GET` route.
    fn get(&mut self, path: &str, handler: impl IntoHandlerSpec) -> Result<&mut Self, TrellisError> {
        self.add_route(Method::Get, path, handler, Vec::new())
    }

    /// Register a `POST` route.
    fn post(&mut self, path: &str, handler: impl IntoHandlerSpec) -> Result<&mut Self, TrellisError> {
        self.add_route(Method::Post, path, handler, Vec::new())
    }

    /// Register a `PUT` route.
    fn put(&mut self, path: &str, handler: impl IntoHandlerSpec) -> Result<&mut Self, TrellisError> {
        self.add_route(Method::Put, path, handler, Vec::new())
    }

    /// Register a `DELETE` route.
    fn delete(&mut self, path: &str, handler: impl IntoHandlerSpec) -> Result<&mut Self, TrellisError> {
        self.add_route(Method::Delete, path, handler, Vec::new())
    }

    /// Register a `PATCH` route.
    fn patch(&mut self, path: &str, handler: impl IntoHandlerSpec) -> Result<&mut Self, TrellisError> {
        self.add_route(Method::Patch, path, handler, Vec::new())
    }

    /// Register an explicit `OPTIONS` route, replacing the synthesized answer.
    fn options(&mut self, path: &str, handler: impl IntoHandlerSpec) -> Result<&mut Self, TrellisError> {
        self.add_route(Method::Options, path, handler, Vec::new())
    }

    /// Register an explicit `HEAD` route, taking precedence over `GET`.
    fn head(&mut self, path: &str, handler: impl IntoHandlerSpec) -> Result<&mut Self, TrellisError> {
        self.add_route(Method::Head, path, handler, Vec::new())
    }

    /// Register routes under a nested prefix with extra middleware.
    fn group<F>(
        &mut self,
        prefix: &str,
        middlewares: Vec<BoxMiddleware>,
        routes: F,
    ) -> Result<&mut Self, TrellisError>
    where
        F: FnOnce(&mut RouteGroup<'_>) -> Result<(), TrellisError>,
    {
        let scope = self
            .scope()
            .nest(prefix, middlewares)
            .map_err(RegistrationError::from)?;
        let mut group = RouteGroup {
            router: self.router_mut(),
            scope,
        };
        routes(&mut group)?;
        Ok(self)
    }
}

impl RouteRegistrar for Router {
    fn scope(&self) -> &Scope {
        self.root_scope()
    }

    fn router_mut(&mut self) -> &mut Router {
        self
    }
}

impl RouteRegistrar for RouteGroup<'_> {
    fn scope(&self) -> &Scope {
        &self.scope
    }

    fn router_mut(&mut self) -> &mut Router {
        self.router
    }
}
