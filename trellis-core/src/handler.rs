//! # Terminal Handlers
//!
//! The handler is the innermost link of a middleware chain: it receives the
//! request context and an empty response template and produces the response.
//!
//! # Usage Patterns
//!
//! 1. **Direct closure**: `|ctx: &mut RequestContext, res: Response| ...`
//! 2. **Struct implementation**: `impl Handler for ShowUser`
//! 3. **Erased**: [`BoxHandler`], the uniform shape stored in routes
//!
//! Whatever the handler returns goes through [`IntoResponse`]: a `Response`
//! is used verbatim, anything else becomes the body of a new 200 response.

use crate::{
    context::RequestContext,
    error::BoxError,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// The terminal endpoint of a middleware chain.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a route handler",
    label = "missing `Handler` implementation",
    note = "Handlers are `Fn(&mut RequestContext, Response) -> impl IntoResponse`."
)]
pub trait Handler: Send + Sync + 'static {
    /// The handler's return value, converted with [`IntoResponse`].
    type Output: IntoResponse;

    /// Execute the handler.
    fn call(&self, ctx: &mut RequestContext, response: Response) -> Self::Output;
}

// Blanket impl for closures
impl<F, Out> Handler for F
where
    F: Fn(&mut RequestContext, Response) -> Out + Send + Sync + 'static,
    Out: IntoResponse,
{
    type Output = Out;

    fn call(&self, ctx: &mut RequestContext, response: Response) -> Self::Output {
        (self)(ctx, response)
    }
}

/// Object-safe version of [`Handler`] with the output already converted.
pub trait DynHandler: Send + Sync + 'static {
    /// Execute the handler and convert its output.
    fn call_dyn(&self, ctx: &mut RequestContext, response: Response) -> Result<Response, BoxError>;
}

impl<H: Handler> DynHandler for H {
    fn call_dyn(&self, ctx: &mut RequestContext, response: Response) -> Result<Response, BoxError> {
        self.call(ctx, response).into_response()
    }
}

/// A shared, type-erased handler.
pub type BoxHandler = Arc<dyn DynHandler>;

/// Pin a closure to the handler signature so its argument types are inferred.
///
/// ```rust
/// use trellis_core::{handler_fn, Handler};
///
/// let show = handler_fn(|ctx, _res| format!("user {}", ctx.param("id").unwrap_or("?")));
/// # fn assert_handler<H: Handler>(_: &H) {}
/// # assert_handler(&show);
/// ```
pub fn handler_fn<F, Out>(f: F) -> F
where
    F: Fn(&mut RequestContext, Response) -> Out + Send + Sync + 'static,
    Out: IntoResponse,
{
    f
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{context::Params, method::Method};
    use std::collections::HashMap;

    struct Echo;

    impl Handler for Echo {
        type Output = String;

        fn call(&self, ctx: &mut RequestContext, _response: Response) -> String {
            ctx.path().to_string()
        }
    }

    fn ctx() -> RequestContext {
        RequestContext::new(Method::Get, "/echo", Params::new(), HashMap::new())
    }

    #[test]
    fn test_struct_handler_auto_wraps() {
        let handler: BoxHandler = Arc::new(Echo);
        let res = handler.call_dyn(&mut ctx(), Response::empty()).unwrap();
        assert_eq!(res.status(), 200);
        assert_eq!(res.body().to_string(), "/echo");
    }

    #[test]
    fn test_closure_handler_uses_template() {
        let handler: BoxHandler = Arc::new(handler_fn(|_ctx, res| res.with_status(201)));
        let res = handler.call_dyn(&mut ctx(), Response::empty()).unwrap();
        assert_eq!(res.status(), 201);
    }
}
