//! # trellis-std
//!
//! Standard implementations for the Trellis request router.
//!
//! This crate provides:
//! - **Path guard**: [`path::normalize`], shared by registration and lookup
//! - **Route storage**: [`RouteTrie`], [`StaticRoutes`], [`RouteCache`]
//! - **Handler validation**: [`HandlerValidator`] with controller and function registries
//! - **Standard middleware**: Logging, Timing
//! - **Testing helpers**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use trellis_core;

// Modules
pub mod guard;
pub mod middleware;
pub mod path;
pub mod routing;
pub mod testing;

pub use guard::{
    Controller, ControllerRegistry, FunctionRegistry, HandlerSpec, HandlerValidator, IntoHandlerSpec,
};
pub use routing::{RouteCache, RouteTrie, StaticRoutes};
