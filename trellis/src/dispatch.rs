//! Request dispatch.
//!
//! ```text
//! method ─▶ resolve ─┬─ OPTIONS, no explicit route ─▶ 204 + Allow
//!                    ├─ no route ───────────────────▶ RouteNotFound
//!                    └─ route ─▶ global ▸ group ▸ route ▸ handler
//!                                 └─ HEAD: body dropped
//! ```

use crate::router::{RouteEntry, Router};
use serde_json::Value;
use std::collections::HashMap;
use trellis_core::{Chain, Method, RequestContext, Response, RoutingError};
use trellis_std::path;

/// Status of a synthesized `OPTIONS` answer.
pub const OPTIONS_STATUS: u16 = 204;

/// Header carrying the allowed methods.
pub const ALLOW_HEADER: &str = "Allow";

impl Router {
    /// Dispatch a request.
    ///
    /// Request-time errors (bad method, traversal, oversized parameter, no
    /// route) are returned. Failures inside the middleware chain never are:
    /// they become a 500 response at the failing link.
    pub fn dispatch(
        &self,
        method: &str,
        path: &str,
        data: HashMap<String, Value>,
    ) -> Result<Response, RoutingError> {
        let method = Method::resolve(method)?;
        let path = path::normalize(path)?;

        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("dispatch", method = %method, path = %path).entered();

        let Some(entry) = self.route_for(method, &path)? else {
            if method == Method::Options {
                return self.synthesize_options(&path);
            }
            #[cfg(feature = "tracing")]
            tracing::debug!("no route");
            return Err(RoutingError::RouteNotFound {
                method: method.as_str().to_string(),
                path,
            });
        };

        let RouteEntry {
            handler,
            middlewares,
            params,
        } = entry;
        let chain = Chain::layered([&self.middlewares[..], &middlewares[..]], handler);
        let mut ctx = RequestContext::new(method, path, params, data);
        #[cfg(feature = "tracing")]
        let layers = chain.depth();
        let response = chain.invoke(&mut ctx);

        #[cfg(feature = "tracing")]
        tracing::debug!(status = response.status(), layers, "dispatched");

        if method == Method::Head {
            return Ok(response.without_body());
        }
        Ok(response)
    }

    /// The route serving `method`, with `HEAD` falling back to `GET`.
    fn route_for(&self, method: Method, path: &str) -> Result<Option<RouteEntry>, RoutingError> {
        match self.resolve(method, path)? {
            Some(entry) => Ok(Some(entry)),
            None if method == Method::Head => self.resolve(method.lookup(), path),
            None => Ok(None),
        }
    }

    fn synthesize_options(&self, path: &str) -> Result<Response, RoutingError> {
        let allowed = self.allowed_at(path)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(allow = %allowed.allow_header(), "synthesized OPTIONS");
        Ok(Response::empty()
            .with_status(OPTIONS_STATUS)
            .with_header(ALLOW_HEADER, allowed.allow_header()))
    }
}
