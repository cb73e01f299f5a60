//! # trellis-core
//!
//! Core traits and value types for the Trellis request router.
//!
//! This crate has minimal dependencies and is meant to be imported by
//! middleware and handler crates that don't need the routing engine itself.
//!
//! # Building Blocks
//!
//! ## [`Method`] / [`MethodSet`]
//!
//! The closed set of seven HTTP methods, with the `HEAD` → `GET` lookup rule
//! and `Allow` header rendering.
//!
//! ## [`RequestContext`] / [`Response`]
//!
//! The per-dispatch mutable bag and the copy-on-write response value.
//!
//! ## [`Handler`] and [`Middleware`]
//!
//! The two capabilities application code supplies. Both accept either a
//! struct implementing the trait or a bare closure, and both erase to one
//! uniform shape ([`BoxHandler`], [`BoxMiddleware`]).
//!
//! ## [`Chain`]
//!
//! The onion composition of middleware around a handler, with per-link
//! failure isolation.
//!
//! # Error Types
//!
//! - [`TrellisError`] - Top-level error type
//! - [`RoutingError`] - Request-time errors
//! - [`RegistrationError`] - Configuration-time errors
//! - [`ChainError`] - Link failures, never surfaced out of a chain

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod chain;
mod context;
mod error;
mod handler;
mod method;
mod middleware;
mod response;

// Re-exports
pub use chain::{Chain, Next, run_link};
pub use context::{Params, RequestContext};
pub use error::{
    BoxError, ChainError, ConfigError, RegistrationError, RoutingError, TrellisError,
};
pub use handler::{BoxHandler, DynHandler, Handler, handler_fn};
pub use method::{Method, MethodSet};
pub use middleware::{BoxMiddleware, Middleware, boxed, from_fn};
pub use response::{Body, Headers, INTERNAL_ERROR_BODY, IntoResponse, Response};
