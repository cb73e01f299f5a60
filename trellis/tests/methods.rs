use std::collections::BTreeSet;
use trellis::{
    ALLOW_HEADER, Body, MethodSet, OPTIONS_STATUS, RouteRegistrar, Router, RouterConfig,
    RoutingError, handler_fn,
};

mod common;
use common::{no_data, ok, router_with};

fn allow_set(value: &str) -> BTreeSet<&str> {
    value.split(", ").collect()
}

#[test]
fn test_options_synthesized_from_registered_methods() {
    let mut router = Router::new();
    router.get("/items", ok).unwrap();
    router.post("/items", ok).unwrap();

    let res = router.dispatch("OPTIONS", "/items/", no_data()).unwrap();
    assert_eq!(res.status(), OPTIONS_STATUS);
    assert!(res.body().is_empty());

    let allow = res.header(ALLOW_HEADER).unwrap();
    assert_eq!(allow_set(allow), BTreeSet::from(["GET", "POST", "HEAD", "OPTIONS"]));
    assert_eq!(allow.split(", ").count(), 4);
}

#[test]
fn test_options_skips_middleware_and_handler() {
    let mut router = Router::new();
    router.use_middleware(trellis::from_fn(|_, _| Err("must not run".into())));
    router.put("/doc/:id", ok).unwrap();

    let res = router.dispatch("OPTIONS", "/doc/7", no_data()).unwrap();
    assert_eq!(res.status(), 204);
    assert_eq!(res.header(ALLOW_HEADER), Some("PUT, OPTIONS"));
}

#[test]
fn test_no_head_without_get() {
    let mut router = Router::new();
    router.delete("/x", ok).unwrap();
    assert_eq!(
        router.allowed_methods("/x").unwrap(),
        MethodSet::DELETE | MethodSet::OPTIONS
    );
}

#[test]
fn test_head_mirrors_get_without_body() {
    let mut router = Router::new();
    router
        .get(
            "/report/:id",
            handler_fn(|ctx, res| {
                res.with_status(203)
                    .with_header("X-Report", ctx.param("id").unwrap_or_default())
                    .with_body(Body::Json(serde_json::json!({ "rows": 3 })))
            }),
        )
        .unwrap();

    let get = router.dispatch("GET", "/report/9", no_data()).unwrap();
    let head = router.dispatch("HEAD", "/report/9", no_data()).unwrap();

    assert!(!get.body().is_empty());
    assert_eq!(head.body(), &Body::Empty);
    assert_eq!(head.status(), 203);
    assert_eq!(head.headers(), get.headers());
}

#[test]
fn test_head_keeps_original_method_on_context() {
    let mut router = Router::new();
    router
        .get("/m", handler_fn(|ctx, res| res.with_header("X-Method", ctx.method().as_str())))
        .unwrap();

    let res = router.dispatch("HEAD", "/m", no_data()).unwrap();
    assert_eq!(res.header("X-Method"), Some("HEAD"));
}

#[test]
fn test_head_without_get_is_not_found() {
    let mut router = Router::new();
    router.post("/only-post", ok).unwrap();
    assert!(router.dispatch("HEAD", "/only-post", no_data()).is_err());
}

#[test]
fn test_options_surfaces_oversized_parameter() {
    let mut router = router_with(RouterConfig::default().max_param_length(10));
    router.get("/user/:id", ok).unwrap();
    let path = format!("/user/{}", "A".repeat(256));

    for method in ["GET", "OPTIONS"] {
        assert!(matches!(
            router.dispatch(method, &path, no_data()),
            Err(RoutingError::ParameterTooLong { .. })
        ));
    }
    assert!(matches!(
        router.allowed_methods(&path),
        Err(RoutingError::ParameterTooLong { .. })
    ));
    assert_eq!(
        router.allowed_methods("/user/short").unwrap(),
        MethodSet::GET | MethodSet::HEAD | MethodSet::OPTIONS
    );
}

#[test]
fn test_explicit_head_route_wins_over_get() {
    let mut router = Router::new();
    router.get("/feed", handler_fn(|_, res| res.with_header("X-Via", "get"))).unwrap();
    router.head("/feed", handler_fn(|_, res| res.with_header("X-Via", "head").with_body("dropped"))).unwrap();

    let res = router.dispatch("HEAD", "/feed", no_data()).unwrap();
    assert_eq!(res.header("X-Via"), Some("head"));
    assert_eq!(res.body(), &Body::Empty);
}
