//! Middleware chain composition.
//!
//! A [`Chain`] is an ordered list of middleware around one terminal handler.
//! Invoking it calls the first middleware with a [`Next`] that covers the rest
//! of the list; the last `Next` calls the handler.
//!
//! Every link runs behind its own guard. A link that returns `Err` or panics
//! yields a 500 response *at that link*, so the middleware enclosing it still
//! gets a response back from `next` and runs its post-processing.

use crate::{
    context::RequestContext,
    error::{BoxError, ChainError},
    handler::{BoxHandler, DynHandler},
    middleware::BoxMiddleware,
    response::Response,
};
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// A composed middleware chain ending in a handler.
#[derive(Clone)]
pub struct Chain {
    middlewares: Vec<BoxMiddleware>,
    handler: BoxHandler,
}

impl Chain {
    /// Compose `middlewares` (outermost first) around `handler`.
    pub fn new(middlewares: impl IntoIterator<Item = BoxMiddleware>, handler: BoxHandler) -> Self {
        Self {
            middlewares: middlewares.into_iter().collect(),
            handler,
        }
    }

    /// Compose layers, outermost first: typically global, then route-level.
    pub fn layered<'a>(
        layers: impl IntoIterator<Item = &'a [BoxMiddleware]>,
        handler: BoxHandler,
    ) -> Self {
        Self::new(layers.into_iter().flatten().cloned(), handler)
    }

    /// Number of middleware wrapped around the handler.
    pub fn depth(&self) -> usize {
        self.middlewares.len()
    }

    /// Run the chain. Never fails: link failures become 500 responses.
    pub fn invoke(&self, ctx: &mut RequestContext) -> Response {
        self.next().run(ctx)
    }

    fn next(&self) -> Next<'_> {
        Next {
            middlewares: &self.middlewares,
            handler: self.handler.as_ref(),
        }
    }
}

/// Handle to the remainder of a chain, passed to each middleware.
///
/// `Next` is `Copy`: a middleware may call [`Next::run`] zero, one, or
/// several times.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    middlewares: &'a [BoxMiddleware],
    handler: &'a dyn DynHandler,
}

impl Next<'_> {
    /// Invoke the rest of the chain.
    pub fn run(&self, ctx: &mut RequestContext) -> Response {
        let outcome = match self.middlewares.split_first() {
            Some((head, rest)) => {
                let next = Next {
                    middlewares: rest,
                    handler: self.handler,
                };
                run_link(|| head.process(ctx, next))
            }
            None => run_link(|| self.handler.call_dyn(ctx, Response::empty())),
        };

        outcome.unwrap_or_else(link_failed)
    }
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn link_failed(err: ChainError) -> Response {
    #[cfg(feature = "tracing")]
    tracing::warn!(error = %err, "chain link failed, substituting 500 response");
    Response::internal_error()
}

/// Run a single link, catching both returned errors and panics.
pub fn run_link<F>(link: F) -> Result<Response, ChainError>
where
    F: FnOnce() -> Result<Response, BoxError>,
{
    match catch_unwind(AssertUnwindSafe(link)) {
        Ok(Ok(response)) => Ok(response),
        Ok(Err(err)) => Err(ChainError::Custom(err)),
        Err(payload) => Err(ChainError::Panic(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
