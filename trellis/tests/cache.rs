use proptest::prelude::*;
use trellis::{RouteRegistrar, Router, RouterConfig, testing::RecordingMiddleware, testing::TraceRecorder};

mod common;
use common::{echo_params, no_data, ok, router_with};

#[test]
fn test_cache_stays_within_limit() {
    let mut router = router_with(RouterConfig::default().cache_limit(5));
    router.get("/user/:id", echo_params).unwrap();

    for n in 0..20 {
        router.dispatch("GET", &format!("/user/{n}"), no_data()).unwrap();
        assert!(router.stats().cached_routes <= 5);
    }
    assert_eq!(router.stats().cached_routes, 5);
}

#[test]
fn test_clear_cache_keeps_routes_and_middleware() {
    let mut router = router_with(RouterConfig::default().cache_limit(3));
    router.use_middleware(RecordingMiddleware::new("G", TraceRecorder::new()));
    router.get("/static", ok).unwrap();
    router.get("/user/:id", echo_params).unwrap();
    for n in 0..5 {
        router.dispatch("GET", &format!("/user/{n}"), no_data()).unwrap();
    }

    let before = router.stats();
    assert_eq!(before.cached_routes, 3);

    router.clear_cache();
    let after = router.stats();
    assert_eq!(after.cached_routes, 0);
    assert_eq!(after.static_routes, before.static_routes);
    assert_eq!(after.global_middlewares, before.global_middlewares);
    assert_eq!(after.cache_limit, 3);

    // Still routable after clearing.
    assert!(router.dispatch("GET", "/user/9", no_data()).is_ok());
}

#[test]
fn test_zero_limit_disables_cache() {
    let mut router = router_with(RouterConfig::default().cache_limit(0));
    router.get("/user/:id", echo_params).unwrap();
    router.dispatch("GET", "/user/1", no_data()).unwrap();
    assert_eq!(router.stats().cached_routes, 0);
}

#[test]
fn test_cached_params_are_per_path() {
    let mut router = Router::new();
    router.get("/user/:id", echo_params).unwrap();

    for _ in 0..2 {
        for id in ["a", "b"] {
            let res = router.dispatch("GET", &format!("/user/{id}"), no_data()).unwrap();
            assert_eq!(res.body().to_string(), format!("id={id}"));
        }
    }
    assert_eq!(router.stats().cached_routes, 2);
}

#[test]
fn test_head_shares_get_cache_entry() {
    let mut router = Router::new();
    router.get("/user/:id", echo_params).unwrap();
    router.dispatch("GET", "/user/1", no_data()).unwrap();
    router.dispatch("HEAD", "/user/1", no_data()).unwrap();
    assert_eq!(router.stats().cached_routes, 1);
}

proptest! {
    #[test]
    fn prop_cache_never_exceeds_limit(limit in 0usize..8, ids in prop::collection::vec(0u32..50, 0..60)) {
        let mut router = router_with(RouterConfig::default().cache_limit(limit));
        router.get("/n/:n", echo_params).unwrap();
        for id in ids {
            router.dispatch("GET", &format!("/n/{id}"), no_data()).unwrap();
            prop_assert!(router.stats().cached_routes <= limit);
        }
    }
}
