mod common;

use axum::http::StatusCode;
use common::{send, setup_test_app};
use serde_json::json;

#[tokio::test]
async fn test_root_health() {
    let app = setup_test_app();

    let (status, body) = send(&app, "GET", "/", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": "OK", "message": "API is up and running!" })
    );
}

#[tokio::test]
async fn test_unknown_route_returns_not_found_envelope() {
    let app = setup_test_app();

    for (method, uri) in [
        ("GET", "/v1/unknown"),
        ("POST", "/v2/cars?page=1"),
        ("DELETE", "/nothing/here"),
    ] {
        let (status, body) = send(&app, method, uri, None, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["name"], "NotFoundError");
        let message = body["error"]["message"].as_str().unwrap();
        assert!(message.contains(method), "{}", message);
        assert!(message.contains(uri), "{}", message);
        assert_eq!(body["error"]["details"]["method"], method);
        assert_eq!(body["error"]["details"]["url"], uri);
    }
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app();

    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/v1/cars").is_some());
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = setup_test_app();
    let request = axum::http::Request::builder()
        .uri("/")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}
