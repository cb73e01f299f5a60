//! Named handler lookup tables.
//!
//! Routes may name their handler instead of passing it directly:
//!
//! - a controller action, `("app::controllers::Users", "show")`, resolved
//!   through a [`ControllerRegistry`]
//! - a bare function name, `"health_check"`, resolved through a
//!   [`FunctionRegistry`]
//!
//! Both tables are filled by application code before routes are registered.

use std::collections::HashMap;
use std::sync::Arc;
use trellis_core::{BoxHandler, Handler};

/// A controller type: a fully-qualified name plus its callable actions.
///
/// ```rust
/// use trellis_core::{RequestContext, Response};
/// use trellis_std::guard::Controller;
///
/// let users = Controller::new("app::controllers::Users")
///     .action("index", |_: &mut RequestContext, _: Response| "all users")
///     .action("show", |ctx: &mut RequestContext, _: Response| {
///         format!("user {}", ctx.param("id").unwrap_or_default())
///     });
/// assert!(users.has_action("show"));
/// ```
pub struct Controller {
    name: String,
    actions: HashMap<String, BoxHandler>,
}

impl Controller {
    /// Create a controller with no actions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actions: HashMap::new(),
        }
    }

    /// Add an action.
    pub fn action(mut self, name: impl Into<String>, handler: impl Handler) -> Self {
        self.actions.insert(name.into(), Arc::new(handler));
        self
    }

    /// The fully-qualified type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if the action exists.
    pub fn has_action(&self, action: &str) -> bool {
        self.actions.contains_key(action)
    }

    /// Fetch an action's handler.
    pub fn get(&self, action: &str) -> Option<&BoxHandler> {
        self.actions.get(action)
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("name", &self.name)
            .field("actions", &self.actions.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Controllers keyed by fully-qualified name.
#[derive(Debug, Default)]
pub struct ControllerRegistry {
    controllers: HashMap<String, Controller>,
}

impl ControllerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a controller, replacing one with the same name.
    pub fn register(&mut self, controller: Controller) -> &mut Self {
        self.controllers
            .insert(controller.name().to_string(), controller);
        self
    }

    /// Look up a controller by fully-qualified name.
    pub fn get(&self, name: &str) -> Option<&Controller> {
        self.controllers.get(name)
    }

    /// Number of registered controllers.
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    /// Returns `true` if no controller is registered.
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

/// Plain handler functions keyed by name.
#[derive(Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, BoxHandler>,
}

impl FunctionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function under `name`.
    pub fn register(&mut self, name: impl Into<String>, handler: impl Handler) -> &mut Self {
        self.functions.insert(name.into(), Arc::new(handler));
        self
    }

    /// Look up a function by name.
    pub fn get(&self, name: &str) -> Option<&BoxHandler> {
        self.functions.get(name)
    }

    /// Number of registered functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns `true` if no function is registered.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}
