use super::*;
use crate::app::test_helpers::TEST_STYLESHEET;

#[tokio::test]
async fn health_reports_version_and_sessions() {
    let (router, _app, _temp_dir) = create_test_router();
    new_session(&router).await;

    let (status, body) = send(&router, empty("GET", "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["sessions"], 1);
}

#[tokio::test]
async fn openapi_json_is_served() {
    let (router, _app, _temp_dir) = create_test_router();

    let (status, body) = send(&router, empty("GET", "/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["openapi"].as_str().unwrap().starts_with("3."));
    assert!(body["paths"]["/sessions/{id}/process"].is_object());
}

#[tokio::test]
async fn stylesheet_is_served_as_css() {
    let (router, _app, _temp_dir) = create_test_router();

    let response = router.oneshot(empty("GET", "/style.css")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/css")
    );
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(body, TEST_STYLESHEET.as_bytes());
}

#[tokio::test]
async fn events_endpoint_is_an_sse_stream() {
    let (router, _app, _temp_dir) = create_test_router();

    let response = router.oneshot(empty("GET", "/events")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/event-stream")
    );
}
