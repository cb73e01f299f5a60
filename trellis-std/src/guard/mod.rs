//! Handler validation.
//!
//! Runs once per route at registration time and turns a [`HandlerSpec`] into
//! the uniform [`BoxHandler`] stored in the route. Nothing here runs on the
//! dispatch path.
//!
//! # Rules
//!
//! - **Callable**: accepted as is.
//! - **Action**: the controller must be registered, the action must exist on
//!   it, and when an allow-list is configured the controller's
//!   fully-qualified name must start with one of the allowed prefixes.
//! - **Named**: names of process-control and code-execution primitives are
//!   always rejected, whatever the allow-list says; otherwise the name must be
//!   registered.

pub mod registry;

pub use registry::{Controller, ControllerRegistry, FunctionRegistry};

use std::sync::Arc;
use trellis_core::{BoxHandler, Handler, RegistrationError};

/// Handler names that are never accepted for a [`HandlerSpec::Named`] route.
pub const DANGEROUS_HANDLERS: &[&str] = &[
    "system",
    "exec",
    "eval",
    "shell_exec",
    "passthru",
    "popen",
    "proc_open",
    "pcntl_exec",
    "execve",
    "spawn",
    "fork",
    "dlopen",
    "assert",
    "create_function",
];

/// How a route names its handler.
#[derive(Clone)]
pub enum HandlerSpec {
    /// A handler value.
    Callable(BoxHandler),
    /// A controller action, resolved by fully-qualified controller name.
    Action {
        /// Fully-qualified controller name, e.g. `app::controllers::Users`.
        controller: String,
        /// Action on that controller.
        action: String,
    },
    /// A registered function, resolved by name.
    Named(String),
}

impl HandlerSpec {
    /// Wrap a handler value.
    pub fn callable(handler: impl Handler) -> Self {
        HandlerSpec::Callable(Arc::new(handler))
    }

    /// Refer to a controller action.
    pub fn action(controller: impl Into<String>, action: impl Into<String>) -> Self {
        HandlerSpec::Action {
            controller: controller.into(),
            action: action.into(),
        }
    }

    /// Refer to a registered function.
    pub fn named(name: impl Into<String>) -> Self {
        HandlerSpec::Named(name.into())
    }
}

impl From<BoxHandler> for HandlerSpec {
    fn from(handler: BoxHandler) -> Self {
        HandlerSpec::Callable(handler)
    }
}

/// Conversion into a [`HandlerSpec`], implemented for every [`Handler`] and
/// for `HandlerSpec` itself.
pub trait IntoHandlerSpec {
    /// Perform the conversion.
    fn into_handler_spec(self) -> HandlerSpec;
}

impl<H: Handler> IntoHandlerSpec for H {
    fn into_handler_spec(self) -> HandlerSpec {
        HandlerSpec::callable(self)
    }
}

impl IntoHandlerSpec for HandlerSpec {
    fn into_handler_spec(self) -> HandlerSpec {
        self
    }
}

impl std::fmt::Debug for HandlerSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandlerSpec::Callable(_) => f.write_str("Callable(..)"),
            HandlerSpec::Action { controller, action } => {
                write!(f, "Action({controller}::{action})")
            }
            HandlerSpec::Named(name) => write!(f, "Named({name})"),
        }
    }
}

/// Returns `true` if `name` refers to a denied primitive.
///
/// Comparison ignores ASCII case and any leading path (`std::process::exec`
/// is as dangerous as `exec`).
pub fn is_dangerous(name: &str) -> bool {
    let last = name
        .trim()
        .rsplit(|c: char| c == ':' || c == '\\' || c == '.')
        .next()
        .unwrap_or(name);
    DANGEROUS_HANDLERS
        .iter()
        .any(|denied| denied.eq_ignore_ascii_case(last))
}

/// Validates handler specs against the registries and namespace allow-list.
#[derive(Debug, Clone, Copy)]
pub struct HandlerValidator<'a> {
    controllers: &'a ControllerRegistry,
    functions: &'a FunctionRegistry,
    allowed_namespaces: &'a [String],
}

impl<'a> HandlerValidator<'a> {
    /// Create a validator. An empty `allowed_namespaces` allows every controller.
    pub fn new(
        controllers: &'a ControllerRegistry,
        functions: &'a FunctionRegistry,
        allowed_namespaces: &'a [String],
    ) -> Self {
        Self {
            controllers,
            functions,
            allowed_namespaces,
        }
    }

    /// Validate a spec and resolve it to a handler.
    pub fn validate(&self, spec: HandlerSpec) -> Result<BoxHandler, RegistrationError> {
        match spec {
            HandlerSpec::Callable(handler) => Ok(handler),
            HandlerSpec::Action { controller, action } => {
                let Some(entry) = self.controllers.get(&controller) else {
                    return Err(RegistrationError::UnknownController(controller));
                };
                let Some(handler) = entry.get(&action) else {
                    return Err(RegistrationError::UnknownAction { controller, action });
                };
                if !self.namespace_allowed(&controller) {
                    return Err(RegistrationError::NamespaceNotAllowed(controller));
                }
                Ok(handler.clone())
            }
            HandlerSpec::Named(name) => {
                if is_dangerous(&name) {
                    return Err(RegistrationError::DangerousHandler(name));
                }
                self.functions
                    .get(&name)
                    .cloned()
                    .ok_or(RegistrationError::UnknownFunction(name))
            }
        }
    }

    fn namespace_allowed(&self, controller: &str) -> bool {
        self.allowed_namespaces.is_empty()
            || self
                .allowed_namespaces
                .iter()
                .any(|prefix| controller.starts_with(prefix.as_str()))
    }
}
