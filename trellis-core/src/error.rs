//! Error types for Trellis.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`TrellisError`] - Top-level error type for all router operations
//! - [`RoutingError`] - Request-time failures surfaced out of dispatch
//! - [`RegistrationError`] - Configuration-time failures raised while adding routes
//! - [`ChainError`] - Failures of a single middleware or handler link
//!
//! Request-time errors are returned to the embedding host so it can pick the
//! transport status code. Chain errors never leave the chain: they are turned
//! into a 500 response at the link boundary.

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Trellis operations.
#[derive(Error, Debug)]
pub enum TrellisError {
    /// A request could not be routed.
    #[error("routing error: {0}")]
    Routing(#[from] RoutingError),

    /// A route could not be registered.
    #[error("registration error: {0}")]
    Registration(#[from] RegistrationError),

    /// Router configuration was rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while resolving a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// The method is not one of the seven supported HTTP methods.
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// The (decoded) path contains `..` or a backslash.
    #[error("path traversal attempt detected: {0}")]
    PathTraversal(String),

    /// A parameter segment exceeded the configured maximum length.
    #[error("parameter `{name}` is {actual} bytes long, limit is {limit}")]
    ParameterTooLong {
        /// Name of the parameter being bound.
        name: String,
        /// Configured limit.
        limit: usize,
        /// Length of the offending segment.
        actual: usize,
    },

    /// No route matches the method and path.
    #[error("no route found for {method} {path}")]
    RouteNotFound {
        /// Requested method (as received, uppercased).
        method: String,
        /// Normalized path.
        path: String,
    },
}

/// Errors raised while registering a route.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// The controller type lies outside every allowed namespace.
    #[error("controller `{0}` is not in an allowed namespace")]
    NamespaceNotAllowed(String),

    /// The handler names a process-control or code-execution primitive.
    #[error("handler `{0}` is not allowed")]
    DangerousHandler(String),

    /// No controller is registered under this type name.
    #[error("unknown controller `{0}`")]
    UnknownController(String),

    /// The controller exists but has no such action.
    #[error("controller `{controller}` has no action `{action}`")]
    UnknownAction {
        /// Fully-qualified controller name.
        controller: String,
        /// Requested action.
        action: String,
    },

    /// No function is registered under this name.
    #[error("unknown handler function `{0}`")]
    UnknownFunction(String),

    /// A different parameter name is already bound at this trie position.
    #[error("parameter `{requested}` in `{path}` conflicts with existing `{existing}`")]
    ConflictingParameter {
        /// Pattern being registered.
        path: String,
        /// Name already bound at that position.
        existing: String,
        /// Name in the new pattern.
        requested: String,
    },

    /// The route's method or path was rejected.
    #[error(transparent)]
    InvalidRoute(#[from] RoutingError),
}

/// Errors raised while loading or validating router configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Failure of a single link in a middleware chain.
#[derive(Error, Debug)]
pub enum ChainError {
    /// The middleware or handler panicked.
    #[error("link panicked: {0}")]
    Panic(String),

    /// The middleware or handler returned an error.
    #[error(transparent)]
    Custom(BoxError),
}

impl From<BoxError> for ChainError {
    fn from(err: BoxError) -> Self {
        ChainError::Custom(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_too_long_message() {
        let err = RoutingError::ParameterTooLong {
            name: "id".into(),
            limit: 10,
            actual: 256,
        };
        assert_eq!(err.to_string(), "parameter `id` is 256 bytes long, limit is 10");
    }

    #[test]
    fn test_registration_wraps_routing() {
        let err: RegistrationError = RoutingError::PathTraversal("/a/../b".into()).into();
        let top: TrellisError = err.into();
        assert!(matches!(
            top,
            TrellisError::Registration(RegistrationError::InvalidRoute(
                RoutingError::PathTraversal(_)
            ))
        ));
    }
}
