//! Testing utilities for Trellis.
//!
//! This module provides helpers for asserting on middleware ordering and
//! failure isolation without writing the bookkeeping by hand.
//!
//! # Features
//!
//! - [`TraceRecorder`]: A shared, ordered log of `before:`/`after:` marks
//! - [`RecordingMiddleware`]: A middleware that marks both of its phases
//! - [`RecordingHandler`]: A handler that marks its invocation
//! - [`FailingMiddleware`] / [`PanickingMiddleware`]: Link failures on demand
//! - [`CountingHandler`]: A handler that counts invocations

use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use trellis_core::{BoxError, Handler, Middleware, Next, RequestContext, Response};

// ============================================================================
// Trace Recorder
// ============================================================================

/// A shared, ordered log of events.
///
/// # Example
///
/// ```rust
/// use trellis_std::testing::{RecordingMiddleware, TraceRecorder};
///
/// let trace = TraceRecorder::new();
/// let outer = RecordingMiddleware::new("G", trace.clone());
/// // register `outer`, dispatch, then:
/// assert!(trace.events().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    events: Arc<Mutex<Vec<String>>>,
}

impl TraceRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn record(&self, event: impl Into<String>) {
        self.events.lock().push(event.into());
    }

    /// A copy of the recorded events.
    pub fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    /// Forget all events.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

// ============================================================================
// Recording Middleware / Handler
// ============================================================================

/// A middleware that records `before:<name>` and `after:<name>` around `next`.
#[derive(Debug, Clone)]
pub struct RecordingMiddleware {
    name: String,
    trace: TraceRecorder,
}

impl RecordingMiddleware {
    /// Create a recording middleware.
    pub fn new(name: impl Into<String>, trace: TraceRecorder) -> Self {
        Self {
            name: name.into(),
            trace,
        }
    }
}

impl Middleware for RecordingMiddleware {
    fn process(&self, ctx: &mut RequestContext, next: Next<'_>) -> Result<Response, BoxError> {
        self.trace.record(format!("before:{}", self.name));
        let response = next.run(ctx);
        self.trace.record(format!("after:{}", self.name));
        Ok(response)
    }
}

/// A handler that records `handler` and returns a fixed body.
#[derive(Debug, Clone)]
pub struct RecordingHandler {
    trace: TraceRecorder,
    body: String,
}

impl RecordingHandler {
    /// Create a recording handler that answers `body`.
    pub fn new(trace: TraceRecorder, body: impl Into<String>) -> Self {
        Self {
            trace,
            body: body.into(),
        }
    }
}

impl Handler for RecordingHandler {
    type Output = String;

    fn call(&self, _ctx: &mut RequestContext, _response: Response) -> String {
        self.trace.record("handler");
        self.body.clone()
    }
}

// ============================================================================
// Failing Middleware
// ============================================================================

/// A middleware that fails before calling `next`.
#[derive(Debug, Clone)]
pub struct FailingMiddleware {
    message: String,
}

impl FailingMiddleware {
    /// Fail with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Middleware for FailingMiddleware {
    fn process(&self, _ctx: &mut RequestContext, _next: Next<'_>) -> Result<Response, BoxError> {
        Err(self.message.clone().into())
    }
}

/// A middleware that calls `next` and then panics.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanickingMiddleware;

impl Middleware for PanickingMiddleware {
    fn process(&self, ctx: &mut RequestContext, next: Next<'_>) -> Result<Response, BoxError> {
        let _ = next.run(ctx);
        panic!("middleware panicked after next")
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingHandler::new();
/// let counter_clone = counter.clone();
///
/// router.get("/ping", counter)?;
/// router.dispatch("GET", "/ping", Default::default())?;
///
/// assert_eq!(counter_clone.count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Handler for CountingHandler {
    type Output = ();

    fn call(&self, _ctx: &mut RequestContext, _response: Response) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}
