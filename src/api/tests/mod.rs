use super::*;
use crate::app::test_helpers::create_test_app;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tower::ServiceExt;

mod system;

const BOUNDARY: &str = "page-translator-test-boundary";

/// Router over a fresh test app; the tempdir must be kept alive
fn create_test_router() -> (Router, Arc<TranslatorApp>, tempfile::TempDir) {
    let (app, temp_dir) = create_test_app();
    let app = Arc::new(app);
    let router = create_router(app.clone(), app.get_config());
    (router, app, temp_dir)
}

/// Send a request and return status plus parsed JSON body (Null when empty)
async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn empty(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// multipart/form-data request with a single `file` field
fn upload_request(uri: &str, file_name: &str, mime: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {mime}\r\n\r\n").as_bytes());
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Create a session through the API and return its id
async fn new_session(router: &Router) -> i64 {
    let (status, body) = send(router, empty("POST", "/sessions")).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_api_server_spawns() {
    let (app, _temp_dir) = create_test_app();

    let mut config = (*app.get_config()).clone();
    config.server.api.bind_address = "127.0.0.1:0".parse().unwrap();
    let config = Arc::new(config);

    let api_handle = tokio::spawn(start_api_server(Arc::new(app), config));

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!api_handle.is_finished());
    api_handle.abort();
}

#[tokio::test]
async fn test_serve_until_stops_on_shutdown_signal() {
    let (app, _temp_dir) = create_test_app();

    let mut config = (*app.get_config()).clone();
    config.server.api.bind_address = "127.0.0.1:0".parse().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let handle = tokio::spawn(serve_until(Arc::new(app), Arc::new(config), async move {
        rx.await.ok();
    }));

    tokio::time::sleep(Duration::from_millis(50)).await;
    tx.send(()).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cors_enabled() {
    let (router, _app, _temp_dir) = create_test_router();

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin"),
        "CORS header should be present when CORS is enabled"
    );
}

#[tokio::test]
async fn test_cors_disabled() {
    let (app, _temp_dir) = create_test_app();
    let mut config = (*app.get_config()).clone();
    config.server.api.cors_enabled = false;
    let router = create_router(Arc::new(app), Arc::new(config));

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert!(
        !response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}

#[tokio::test]
async fn test_cors_specific_origin() {
    let (app, _temp_dir) = create_test_app();
    let mut config = (*app.get_config()).clone();
    config.server.api.cors_origins = vec!["http://allowed.example".to_string()];
    let router = create_router(Arc::new(app), Arc::new(config));

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://allowed.example")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://allowed.example"
    );
}

#[tokio::test]
async fn test_swagger_ui_can_be_disabled() {
    let (app, _temp_dir) = create_test_app();
    let mut config = (*app.get_config()).clone();
    config.server.api.swagger_ui = false;
    let router = create_router(Arc::new(app), Arc::new(config));

    let response = router
        .oneshot(empty("GET", "/swagger-ui/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
