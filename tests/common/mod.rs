#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use bcr::bcr_config::JwtConfig;
use bcr::bcr_core::hash_password_with_cost;
use bcr::bcr_models::{NewUser, RoleInfo, User, access_control};
use bcr::router::init_router;
use bcr::state::AppState;
use bcr::store::{MemoryStore, RoleStore, UserStore};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "123456";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: MemoryStore,
}

pub fn setup_test_app() -> TestApp {
    let store = MemoryStore::new();
    let state = AppState::in_memory(store.clone(), JwtConfig::new("test-secret", 3600), 4);

    TestApp {
        router: init_router(state.clone()),
        state,
        store,
    }
}

/// Inserts a user with `role` directly into the store and signs a token for it.
pub async fn create_test_user(app: &TestApp, email: &str, role: &str) -> (User, String) {
    let role = app.store.find_by_name(role).await.unwrap().unwrap();
    let user = UserStore::create(
        &app.store,
        NewUser {
            name: "Test".to_string(),
            email: email.to_string(),
            encrypted_password: hash_password_with_cost(TEST_PASSWORD, 4).unwrap(),
            role_id: role.id,
            image: None,
        },
    )
    .await
    .unwrap();

    let token = app
        .state
        .auth_service
        .create_token_from_user(&user, &RoleInfo::from(&role))
        .unwrap();

    (user, token)
}

pub async fn admin_token(app: &TestApp) -> String {
    create_test_user(app, "admin@bcr.io", access_control::ADMIN).await.1
}

pub async fn customer_token(app: &TestApp) -> String {
    create_test_user(app, "customer@bcr.io", access_control::CUSTOMER)
        .await
        .1
}

/// Sends a request through the router and returns the status and JSON body
/// (`Value::Null` for an empty body).
pub async fn send(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send_request(app, request).await
}

pub async fn send_request(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

pub fn assert_error(body: &Value, name: &str) {
    assert_eq!(body["error"]["name"], name, "unexpected body: {}", body);
    assert!(
        !body["error"]["message"].as_str().unwrap_or_default().is_empty(),
        "empty error message: {}",
        body
    );
}
