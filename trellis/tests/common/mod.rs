#![allow(dead_code)]

use std::collections::HashMap;
use trellis::{
    BoxMiddleware, Response, RequestContext, Router, RouterConfig, boxed,
    testing::{RecordingMiddleware, TraceRecorder},
};

// ============================================================================
// Fixtures
// ============================================================================

pub fn ok(_: &mut RequestContext, _: Response) -> &'static str {
    "ok"
}

pub fn echo_params(ctx: &mut RequestContext, _: Response) -> String {
    ctx.params()
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn no_data() -> HashMap<String, serde_json::Value> {
    HashMap::new()
}

pub fn recording(name: &str, trace: &TraceRecorder) -> BoxMiddleware {
    boxed(RecordingMiddleware::new(name, trace.clone()))
}

pub fn router_with(config: RouterConfig) -> Router {
    Router::with_config(config).unwrap()
}

pub fn body(res: &Response) -> String {
    res.body().to_string()
}
