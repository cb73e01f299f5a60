use std::collections::HashMap;
use std::sync::Arc;
use trellis_core::{BoxMiddleware, Chain, Method, Params, RequestContext, RoutingError};
use trellis_std::{
    RouteCache, RouteTrie, StaticRoutes, path,
    routing::{is_static, route_key},
    testing::{FailingMiddleware, RecordingHandler, RecordingMiddleware, TraceRecorder},
};

fn register(
    trie: &mut RouteTrie<&'static str>,
    statics: &mut StaticRoutes<&'static str>,
    pattern: &str,
    name: &'static str,
) {
    let canonical = path::normalize(pattern).unwrap();
    trie.insert(Method::Get, &canonical, name).unwrap();
    if is_static(&canonical) {
        statics.insert(Method::Get, &canonical, name);
    }
}

#[test]
fn test_static_table_agrees_with_trie() {
    let mut trie = RouteTrie::new();
    let mut statics = StaticRoutes::new();
    register(&mut trie, &mut statics, "/api/users/", "users");
    register(&mut trie, &mut statics, "/api/users/:id", "user");
    register(&mut trie, &mut statics, "//", "root");

    assert_eq!(statics.len(), 2);
    for raw in ["/api/users", "//api//users", "/", ""] {
        let canonical = path::normalize(raw).unwrap();
        let from_table = statics.get(Method::Get, &canonical).copied();
        let from_trie = trie
            .lookup(Method::Get, &canonical, 255)
            .unwrap()
            .map(|m| *m.value);
        assert_eq!(from_table, from_trie, "diverged on {raw:?}");
    }
}

#[test]
fn test_cache_keyed_by_method_and_path() {
    let mut cache = RouteCache::new(2);
    cache.insert(route_key(Method::Get, "/a"), 1);
    cache.insert(route_key(Method::Post, "/a"), 2);
    assert_eq!(cache.get("GET::/a"), Some(1));
    assert_eq!(cache.get("POST::/a"), Some(2));
}

#[test]
fn test_lookup_guard_order() {
    let mut trie = RouteTrie::new();
    trie.insert(Method::Get, "/f/:name", ()).unwrap();

    assert!(matches!(
        path::normalize("/f/..%2f"),
        Err(RoutingError::PathTraversal(_))
    ));
    assert!(matches!(
        trie.lookup(Method::Get, "/f/abcdef", 3),
        Err(RoutingError::ParameterTooLong { limit: 3, actual: 6, .. })
    ));
}

#[test]
fn test_recording_helpers_trace_onion() {
    let trace = TraceRecorder::new();
    let layers: Vec<BoxMiddleware> = vec![
        Arc::new(RecordingMiddleware::new("outer", trace.clone())),
        Arc::new(RecordingMiddleware::new("inner", trace.clone())),
    ];
    let chain = Chain::new(layers, Arc::new(RecordingHandler::new(trace.clone(), "ok")));
    let mut ctx = RequestContext::new(Method::Get, "/", Params::new(), HashMap::new());

    let res = chain.invoke(&mut ctx);
    assert_eq!(res.body().to_string(), "ok");
    assert_eq!(
        trace.events(),
        ["before:outer", "before:inner", "handler", "after:inner", "after:outer"]
    );

    trace.clear();
    let failing = Chain::new(
        [
            Arc::new(RecordingMiddleware::new("outer", trace.clone())) as BoxMiddleware,
            Arc::new(FailingMiddleware::new("nope")),
        ],
        Arc::new(RecordingHandler::new(trace.clone(), "unreached")),
    );
    assert_eq!(failing.invoke(&mut ctx).status(), 500);
    assert_eq!(trace.events(), ["before:outer", "after:outer"]);
}
