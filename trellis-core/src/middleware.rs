//! # Middleware Capability
//!
//! A middleware wraps the rest of the chain. It receives the request context
//! and a [`Next`] handle, and decides whether, when, and how often to call it.
//!
//! ```text
//!   before:G ─▶ before:R ─▶ handler ─▶ after:R ─▶ after:G
//! ```
//!
//! Not calling `next` short-circuits everything inside. Code after
//! `next.run(ctx)` sees (and may replace) the response produced inside.
//!
//! Two shapes are accepted and both erase to [`BoxMiddleware`]:
//!
//! - a struct implementing [`Middleware`]
//! - a bare closure `Fn(&mut RequestContext, Next<'_>) -> Result<Response, BoxError>`

use crate::{chain::Next, context::RequestContext, error::BoxError, response::Response};
use std::sync::Arc;

/// A unit of behavior wrapped around a route handler.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Middleware`",
    label = "missing `Middleware` implementation",
    note = "Middleware is `Fn(&mut RequestContext, Next<'_>) -> Result<Response, BoxError>`."
)]
pub trait Middleware: Send + Sync + 'static {
    /// Process the request, usually by delegating to `next`.
    ///
    /// Returning `Err` (or panicking) replaces this link's result with a 500
    /// response; enclosing middleware still runs.
    fn process(&self, ctx: &mut RequestContext, next: Next<'_>) -> Result<Response, BoxError>;
}

// Blanket impl for closures
impl<F> Middleware for F
where
    F: Fn(&mut RequestContext, Next<'_>) -> Result<Response, BoxError> + Send + Sync + 'static,
{
    fn process(&self, ctx: &mut RequestContext, next: Next<'_>) -> Result<Response, BoxError> {
        (self)(ctx, next)
    }
}

/// A shared, type-erased middleware.
pub type BoxMiddleware = Arc<dyn Middleware>;

/// Pin a closure to the middleware signature so its argument types are inferred.
pub fn from_fn<F>(f: F) -> F
where
    F: Fn(&mut RequestContext, Next<'_>) -> Result<Response, BoxError> + Send + Sync + 'static,
{
    f
}

/// Erase a middleware into the shared form routes store.
pub fn boxed(middleware: impl Middleware) -> BoxMiddleware {
    Arc::new(middleware)
}
