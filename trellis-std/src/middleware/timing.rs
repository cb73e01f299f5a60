//! Response timing middleware.

use std::time::Instant;
use trellis_core::{BoxError, Middleware, Next, RequestContext, Response};

/// Default header carrying the elapsed time.
pub const RESPONSE_TIME_HEADER: &str = "X-Response-Time";

/// Measures time spent inside the wrapped chain and reports it as a header,
/// formatted as fractional milliseconds (`"0.412ms"`).
#[derive(Debug, Clone)]
pub struct TimingMiddleware {
    header: String,
}

impl Default for TimingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingMiddleware {
    /// Report under [`RESPONSE_TIME_HEADER`].
    pub fn new() -> Self {
        Self::with_header(RESPONSE_TIME_HEADER)
    }

    /// Report under a custom header name.
    pub fn with_header(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
        }
    }
}

impl Middleware for TimingMiddleware {
    fn process(&self, ctx: &mut RequestContext, next: Next<'_>) -> Result<Response, BoxError> {
        let start = Instant::now();
        let response = next.run(ctx);
        let elapsed = start.elapsed().as_secs_f64() * 1000.0;
        Ok(response.with_header(self.header.as_str(), format!("{elapsed:.3}ms")))
    }
}
