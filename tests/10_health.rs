mod common;

use axum::http::{Method, StatusCode};

#[tokio::test]
async fn health_endpoint_responds() {
    let app = common::test_app();

    let (status, body) = app.request(Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
    assert_eq!(body["data"]["status"], "ok");
    assert!(body.get("message").is_some());
}

#[tokio::test]
async fn root_describes_service() {
    let app = common::test_app();

    let (status, body) = app.request(Method::GET, "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "mentor-portal");
    assert!(body["data"]["endpoints"]["project"].is_string());
}
