//! End-to-end tests for the point resolver against a fake screen.
//!
//! These exercise the full path a test step takes: parse an argument, store
//! it as the current point, and ask the lookup what sits underneath.

mod common;

use std::sync::Arc;

use axpoint_core::config::AxpointConfig;
use axpoint_core::point::{ParseError, ScreenPoint, ScreenSize};
use axpoint_core::reserved::ReservedPosition;
use axpoint_core::resolver::{PointResolver, SharedPointResolver};

use common::{landscape_screen, FakeScreen};

const SCREEN: ScreenSize = ScreenSize::new(1000.0, 500.0);

fn resolver_with(screen: Arc<FakeScreen>) -> PointResolver {
    PointResolver::new(screen, SCREEN)
}

#[test]
fn test_coordinates_then_element() {
    let screen = Arc::new(landscape_screen());
    let mut resolver = resolver_with(screen.clone());

    resolver.set_from_string("500,250").unwrap();
    let element = resolver.element_at_current_point().unwrap();
    assert_eq!(element.identifier.as_deref(), Some("play-button"));

    resolver.set_from_string("320, 160").unwrap();
    let element = resolver.element_at_current_point().unwrap();
    assert_eq!(element.identifier.as_deref(), Some("player"));

    assert_eq!(
        screen.queries(),
        vec![ScreenPoint::new(500.0, 250.0), ScreenPoint::new(320.0, 160.0)]
    );
}

#[test]
fn test_every_keyword_resolves_on_fake_screen() {
    let resolver = resolver_with(Arc::new(landscape_screen()));

    let expected = [
        ("left-top", Some("back-button")),
        ("top", None),
        ("right-top", None),
        ("center", Some("play-button")),
        ("left-bottom", None),
        ("bottom", None),
        ("right-bottom", Some("next-button")),
    ];
    for (keyword, id) in expected {
        let found = resolver.element_at_reserved(keyword);
        assert_eq!(
            found.and_then(|e| e.identifier).as_deref(),
            id,
            "keyword {keyword}"
        );
    }
}

#[test]
fn test_empty_area_is_not_an_error() {
    let screen = Arc::new(landscape_screen());
    let mut resolver = resolver_with(screen.clone());

    resolver.set_from_string("150,450").unwrap();
    assert!(resolver.element_at_current_point().is_none());

    resolver.set_from_string("-20,5000").unwrap();
    assert!(resolver.element_at_current_point().is_none());
    assert_eq!(screen.queries().len(), 2);
}

#[test]
fn test_failed_parse_keeps_previous_target() {
    let mut resolver = resolver_with(Arc::new(landscape_screen()));
    resolver.set_from_target("right-bottom").unwrap();

    let err = resolver.set_from_string("abc,5").unwrap_err();
    assert_eq!(err, ParseError::Malformed("abc,5".to_string()));
    assert_eq!(resolver.current(), ScreenPoint::new(900.0, 400.0));
    assert_eq!(
        resolver.element_at_current_point().and_then(|e| e.identifier).as_deref(),
        Some("next-button")
    );
}

#[test]
fn test_roundtrip_through_string() {
    let mut resolver = resolver_with(Arc::new(landscape_screen()));
    for (x, y) in [(12.5, -3.0), (0.1, 0.7), (1e-9, 123456789.125), (-0.5, 0.0)] {
        resolver.set_point(ScreenPoint::new(x, y)).unwrap();
        let rendered = resolver.to_string();

        let mut other = resolver_with(Arc::new(landscape_screen()));
        other.set_from_string(&rendered).unwrap();
        let p = other.current();
        assert!((p.x - x).abs() < 1e-12 && (p.y - y).abs() < 1e-12, "{rendered}");
    }
}

#[test]
fn test_geometry_from_config() {
    let config: AxpointConfig =
        serde_json::from_str(r#"{"margin_ratio": 0.1, "platform": "android"}"#).unwrap();
    let resolver = resolver_with(Arc::new(landscape_screen())).with_geometry(config.geometry());

    assert_eq!(resolver.resolve_reserved("left-top"), Some(ScreenPoint::new(50.0, 50.0)));
    assert_eq!(
        resolver.resolve_reserved("center"),
        Some(ReservedPosition::Center.point_in(SCREEN, resolver.geometry()))
    );
}

#[test]
fn test_shared_resolver_across_threads() {
    let shared = SharedPointResolver::new(resolver_with(Arc::new(landscape_screen())));

    let writer = {
        let shared = shared.clone();
        std::thread::spawn(move || {
            for _ in 0..200 {
                shared.set_from_target("center").unwrap();
                shared.set_from_target("right-bottom").unwrap();
            }
        })
    };

    for _ in 0..200 {
        let p = shared.current();
        assert!(
            p == ScreenPoint::ORIGIN
                || p == ScreenPoint::new(500.0, 250.0)
                || p == ScreenPoint::new(900.0, 400.0),
            "torn point {p:?}"
        );
    }
    writer.join().unwrap();

    assert_eq!(shared.current(), ScreenPoint::new(900.0, 400.0));
    assert_eq!(
        shared.element_at_current_point().and_then(|e| e.identifier).as_deref(),
        Some("next-button")
    );
}
