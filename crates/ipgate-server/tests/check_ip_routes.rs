//! HTTP-level tests for the check-ip router.
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot`.

use std::io::Write;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use ipgate_server::{build_router, parse_ip, AppState, Blocklist};
use serde_json::Value;
use tower::ServiceExt;

fn app() -> Router {
    let blocklist: Blocklist = ["203.0.113.5", "2001:db8::1"]
        .into_iter()
        .filter_map(parse_ip)
        .collect();
    build_router(AppState::new(blocklist), None)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or_else(
        |_| serde_json::json!({ "raw": String::from_utf8_lossy(&bytes).to_string() }),
    );
    (status, body)
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_blocklisted_ip_is_forbidden() {
    let (status, body) = get(app(), "/check-ip?ip=203.0.113.5").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["blocked"], true);
}

#[tokio::test]
async fn test_other_ip_is_allowed() {
    let (status, body) = get(app(), "/check-ip?ip=198.51.100.9").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["blocked"], false);
}

#[tokio::test]
async fn test_encoded_ipv6_matches() {
    let (status, body) = get(app(), "/check-ip?ip=2001%3A0db8%3A%3A0001").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["blocked"], true);
}

#[tokio::test]
async fn test_missing_ip_is_bad_request() {
    let (status, body) = get(app(), "/check-ip").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid IP address");
}

#[tokio::test]
async fn test_invalid_ip_is_bad_request() {
    for uri in ["/check-ip?ip=", "/check-ip?ip=localhost", "/check-ip?ip=300.1.1.1"] {
        let (status, body) = get(app(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {uri}");
        assert!(body.get("blocked").is_none(), "uri: {uri}");
    }
}

#[tokio::test]
async fn test_duplicate_ip_uses_first_value() {
    let (status, body) = get(app(), "/check-ip?ip=203.0.113.5&ip=198.51.100.9").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["blocked"], true);

    let (status, body) = get(app(), "/check-ip?ip=198.51.100.9&ip=203.0.113.5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["blocked"], false);
}

#[tokio::test]
async fn test_duplicate_invalid_first_ip_is_bad_request() {
    let (status, body) = get(app(), "/check-ip?ip=nope&ip=203.0.113.5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid IP address");
}

#[tokio::test]
async fn test_padded_ip_is_bad_request() {
    for uri in [
        "/check-ip?ip=%20203.0.113.5",
        "/check-ip?ip=203.0.113.5%20",
        "/check-ip?ip=+203.0.113.5",
    ] {
        let (status, body) = get(app(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {uri}");
        assert_eq!(body["error"], "invalid IP address", "uri: {uri}");
    }
}

#[tokio::test]
async fn test_static_files_served_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    let mut file = std::fs::File::create(dir.path().join("gate.js")).unwrap();
    write!(file, "console.log('gate');").unwrap();

    let app = build_router(AppState::new(Blocklist::new()), Some(dir.path()));
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/static/gate.js")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"console.log('gate');");
}

#[tokio::test]
async fn test_static_not_mounted_by_default() {
    let (status, _) = get(app(), "/static/gate.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
