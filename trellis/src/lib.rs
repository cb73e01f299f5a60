//! # trellis - In-Process HTTP Request Router
//!
//! `trellis` resolves a method and path to a handler, wraps it in the
//! matching middleware, runs the chain and returns the response. There is no
//! transport: the embedding host turns its own requests into
//! [`Router::dispatch`] calls.
//!
//! ## Quick Start
//!
//! ```rust
//! use trellis::prelude::*;
//!
//! # fn main() -> Result<(), TrellisError> {
//! let mut router = Router::new();
//! router.use_middleware(LoggingMiddleware::new());
//!
//! router.group("/api", vec![boxed(TimingMiddleware::new())], |api| {
//!     api.get("/users/:id", handler_fn(|ctx, _res| {
//!         format!("user {}", ctx.param("id").unwrap_or_default())
//!     }))?;
//!     Ok(())
//! })?;
//!
//! let res = router.dispatch("GET", "/api/users/7", Default::default())?;
//! assert_eq!(res.status(), 200);
//! assert!(res.header("X-Response-Time").is_some());
//!
//! let preflight = router.dispatch("OPTIONS", "/api/users/7", Default::default())?;
//! assert_eq!(preflight.header("Allow"), Some("GET, HEAD, OPTIONS"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Resolution
//!
//! | Step | Structure | When |
//! |------|-----------|------|
//! | 1 | static table | the pattern has no parameters |
//! | 2 | route cache | the path was resolved through the trie before |
//! | 3 | trie | otherwise; the result is cached |
//!
//! Literal segments win over parameters at every level.
//!
//! ## Middleware Order
//!
//! Global middleware wraps group middleware (outer groups first), which
//! wraps route middleware, which wraps the handler. A failing or panicking
//! link becomes a 500 response; the links around it still finish.
//!
//! ## Feature Flags
//!
//! - `tracing` (default): registration, cache and dispatch events
//! - `serde`: `RouterConfig` from TOML, serializable `RouterStats`

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod config;
mod dispatch;
mod group;
mod router;
mod stats;

pub use config::{DEFAULT_MAX_PARAM_LENGTH, RouterConfig};
pub use dispatch::{ALLOW_HEADER, OPTIONS_STATUS};
pub use group::{RouteGroup, RouteRegistrar, Scope};
pub use router::{RouteEntry, Router};
pub use stats::RouterStats;

pub use trellis_core::{
    Body, BoxError, BoxHandler, BoxMiddleware, ChainError, ConfigError, DynHandler, Handler,
    Headers, INTERNAL_ERROR_BODY, IntoResponse, Method, MethodSet, Middleware, Next, Params, RegistrationError,
    RequestContext, Response, RoutingError, TrellisError, boxed, from_fn, handler_fn,
};
pub use trellis_std::guard::{
    Controller, ControllerRegistry, FunctionRegistry, HandlerSpec, IntoHandlerSpec,
};

/// Standard middleware.
pub mod middleware {
    pub use trellis_std::middleware::{LoggingMiddleware, TimingMiddleware};
}

/// Testing utilities.
pub mod testing {
    pub use trellis_std::testing::{
        CountingHandler, FailingMiddleware, PanickingMiddleware, RecordingHandler,
        RecordingMiddleware, TraceRecorder,
    };
}

/// Prelude module - common imports for Trellis.
///
/// # Usage
///
/// ```rust,ignore
/// use trellis::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Errors
        BoxError,
        // Handler specs
        Controller,
        HandlerSpec,
        // Core traits
        Handler,
        IntoResponse,
        Method,
        Middleware,
        Next,
        RequestContext,
        Response,
        // Routing
        RouteRegistrar,
        Router,
        RouterConfig,
        RoutingError,
        TrellisError,
        boxed,
        from_fn,
        handler_fn,
        middleware::{LoggingMiddleware, TimingMiddleware},
    };
}
