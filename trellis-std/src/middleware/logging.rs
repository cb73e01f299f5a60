//! Logging middleware for request observation.

use trellis_core::{BoxError, Middleware, Next, RequestContext, Response};

/// A middleware that logs each request and the status it produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    /// Create a new logging middleware.
    pub const fn new() -> Self {
        Self
    }
}

impl Middleware for LoggingMiddleware {
    fn process(&self, ctx: &mut RequestContext, next: Next<'_>) -> Result<Response, BoxError> {
        #[cfg(feature = "tracing")]
        {
            tracing::info!(method = %ctx.method(), path = ctx.path(), "request started");
        }
        let response = next.run(ctx);
        #[cfg(feature = "tracing")]
        {
            tracing::info!(
                method = %ctx.method(),
                path = ctx.path(),
                status = response.status(),
                "request finished"
            );
        }
        Ok(response)
    }
}
