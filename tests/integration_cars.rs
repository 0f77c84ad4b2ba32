mod common;

use axum::http::StatusCode;
use common::{TestApp, admin_token, assert_error, customer_token, send, setup_test_app};
use serde_json::{Value, json};

fn car_body(name: &str, size: &str) -> Value {
    json!({
        "name": name,
        "price": 300000,
        "size": size,
        "image": "https://source.unsplash.com/500x500"
    })
}

async fn create_car(app: &TestApp, token: &str, name: &str, size: &str) -> Value {
    let (status, body) = send(app, "POST", "/v1/cars", Some(token), Some(car_body(name, size))).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body
}

#[tokio::test]
async fn test_list_cars_default_meta() {
    let app = setup_test_app();
    let admin = admin_token(&app).await;
    for i in 0..20 {
        create_car(&app, &admin, &format!("Car {i}"), "SMALL").await;
    }

    let (status, body) = send(&app, "GET", "/v1/cars", Some(&admin), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cars"].as_array().unwrap().len(), 10);
    assert_eq!(
        body["meta"],
        json!({ "page": 1, "pageCount": 2, "pageSize": 10, "count": 20 })
    );
}

#[tokio::test]
async fn test_list_cars_echoes_raw_pagination() {
    let app = setup_test_app();
    let admin = admin_token(&app).await;
    for i in 0..15 {
        create_car(&app, &admin, &format!("Car {i}"), "SMALL").await;
    }

    let (status, body) = send(&app, "GET", "/v1/cars?page=2&pageSize=5", Some(&admin), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["meta"],
        json!({ "page": "2", "pageCount": 3, "pageSize": "5", "count": 15 })
    );
    assert_eq!(body["cars"][0]["name"], "Car 5");
}

#[tokio::test]
async fn test_list_cars_extreme_pagination() {
    let app = setup_test_app();
    let admin = admin_token(&app).await;
    for i in 0..3 {
        create_car(&app, &admin, &format!("Car {i}"), "SMALL").await;
    }

    let uri = format!("/v1/cars?page={}&pageSize=2", i64::MAX);
    let (status, body) = send(&app, "GET", &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["cars"].as_array().unwrap().len(), 0);
    assert_eq!(body["meta"]["pageCount"], 2);
    assert_eq!(body["meta"]["page"], i64::MAX.to_string());

    let uri = format!("/v1/cars?page=1&pageSize={}", i64::MAX);
    let (status, body) = send(&app, "GET", &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["cars"].as_array().unwrap().len(), 3);
    assert_eq!(body["meta"]["pageCount"], 1);
}

#[tokio::test]
async fn test_list_cars_filters() {
    let app = setup_test_app();
    let admin = admin_token(&app).await;
    create_car(&app, &admin, "Mazda RX4", "SMALL").await;
    create_car(&app, &admin, "Ferrari", "LARGE").await;
    create_car(&app, &admin, "Mazda CX5", "LARGE").await;

    let (_, body) = send(&app, "GET", "/v1/cars?size=LARGE", Some(&admin), None).await;
    assert_eq!(body["meta"]["count"], 2);

    let (_, body) = send(&app, "GET", "/v1/cars?name=mazda", Some(&admin), None).await;
    assert_eq!(body["meta"]["count"], 2);

    let (_, body) = send(&app, "GET", "/v1/cars?name=mazda&size=SMALL", Some(&admin), None).await;
    assert_eq!(body["meta"]["count"], 1);
    assert_eq!(body["cars"][0]["name"], "Mazda RX4");
}

#[tokio::test]
async fn test_list_cars_available_at() {
    let app = setup_test_app();
    let admin = admin_token(&app).await;
    let customer = customer_token(&app).await;
    let rented = create_car(&app, &admin, "Mazda RX4", "SMALL").await;
    create_car(&app, &admin, "Ferrari", "LARGE").await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/v1/cars/{}/rent", rented["id"]),
        Some(&customer),
        Some(json!({ "rentStartedAt": "2024-03-01T00:00:00Z", "rentEndedAt": "2024-03-03T00:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, "GET", "/v1/cars?availableAt=2024-03-02", Some(&customer), None).await;
    assert_eq!(body["meta"]["count"], 1);
    assert_eq!(body["cars"][0]["name"], "Ferrari");

    let (_, body) = send(&app, "GET", "/v1/cars?availableAt=2024-03-05", Some(&customer), None).await;
    assert_eq!(body["meta"]["count"], 2);
}

#[tokio::test]
async fn test_list_cars_invalid_available_at() {
    let app = setup_test_app();
    let customer = customer_token(&app).await;

    let (status, body) =
        send(&app, "GET", "/v1/cars?availableAt=yesterday", Some(&customer), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "BadRequestError");
}

#[tokio::test]
async fn test_list_cars_requires_token() {
    let app = setup_test_app();

    let (status, body) = send(&app, "GET", "/v1/cars", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error(&body, "UnauthorizedError");
}

#[tokio::test]
async fn test_create_car_as_admin() {
    let app = setup_test_app();
    let admin = admin_token(&app).await;

    let body = create_car(&app, &admin, "Mazda RX4", "SMALL").await;

    assert_eq!(body["name"], "Mazda RX4");
    assert_eq!(body["price"], 300000);
    assert_eq!(body["isCurrentlyRented"], false);
    assert!(body["id"].is_i64());
}

#[tokio::test]
async fn test_create_car_as_customer_is_insufficient_access() {
    let app = setup_test_app();
    let customer = customer_token(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/v1/cars",
        Some(&customer),
        Some(car_body("Mazda RX4", "SMALL")),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error(&body, "InsufficientAccessError");
    assert_eq!(body["error"]["details"]["role"], "CUSTOMER");
}

#[tokio::test]
async fn test_create_car_type_mismatch() {
    let app = setup_test_app();
    let admin = admin_token(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/v1/cars",
        Some(&admin),
        Some(json!({ "name": ["False"], "price": "1000", "size": "SMALL", "image": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_error(&body, "ValidationError");
    assert_eq!(
        body["error"]["details"]["name"],
        json!(["name has an invalid type: sequence, expected a string"])
    );
}

#[tokio::test]
async fn test_create_car_rule_violations() {
    let app = setup_test_app();
    let admin = admin_token(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/v1/cars",
        Some(&admin),
        Some(json!({ "name": "", "price": -5, "size": "SMALL", "image": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_error(&body, "ValidationError");
    let details = &body["error"]["details"];
    assert!(details.get("name").is_some());
    assert!(details.get("price").is_some());
    assert!(details.get("image").is_some());
}

#[tokio::test]
async fn test_get_car() {
    let app = setup_test_app();
    let admin = admin_token(&app).await;
    let customer = customer_token(&app).await;
    let car = create_car(&app, &admin, "Mazda RX4", "SMALL").await;

    let (status, body) = send(&app, "GET", &format!("/v1/cars/{}", car["id"]), Some(&customer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, car);

    let (status, body) = send(&app, "GET", "/v1/cars/999", Some(&customer), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "RecordNotFoundError");
    assert_eq!(body["error"]["message"], "Car not found");
}

#[tokio::test]
async fn test_update_car() {
    let app = setup_test_app();
    let admin = admin_token(&app).await;
    let car = create_car(&app, &admin, "Mazda RX4", "SMALL").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/v1/cars/{}", car["id"]),
        Some(&admin),
        Some(json!({ "price": 150000, "size": "MEDIUM" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 150000);
    assert_eq!(body["size"], "MEDIUM");
    assert_eq!(body["name"], "Mazda RX4");
}

#[tokio::test]
async fn test_update_and_delete_missing_or_malformed_id() {
    let app = setup_test_app();
    let admin = admin_token(&app).await;

    for id in ["999", "abc", "-"] {
        let uri = format!("/v1/cars/{}", id);

        let (status, body) = send(&app, "PUT", &uri, Some(&admin), Some(json!({ "price": 1 }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "PUT {}", uri);
        assert_error(&body, "RecordNotFoundError");

        let (status, body) = send(&app, "DELETE", &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {}", uri);
        assert_error(&body, "RecordNotFoundError");
    }
}

#[tokio::test]
async fn test_delete_car() {
    let app = setup_test_app();
    let admin = admin_token(&app).await;
    let car = create_car(&app, &admin, "Mazda RX4", "SMALL").await;
    let uri = format!("/v1/cars/{}", car["id"]);

    let (status, body) = send(&app, "DELETE", &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "GET", &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_car_as_customer() {
    let app = setup_test_app();
    let admin = admin_token(&app).await;
    let customer = customer_token(&app).await;
    let car = create_car(&app, &admin, "Mazda RX4", "SMALL").await;

    let (status, body) = send(&app, "DELETE", &format!("/v1/cars/{}", car["id"]), Some(&customer), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error(&body, "InsufficientAccessError");
}

#[tokio::test]
async fn test_rent_car_flow() {
    let app = setup_test_app();
    let admin = admin_token(&app).await;
    let customer = customer_token(&app).await;
    let car = create_car(&app, &admin, "Mazda RX4", "SMALL").await;
    let uri = format!("/v1/cars/{}/rent", car["id"]);

    let (status, body) = send(
        &app,
        "POST",
        &uri,
        Some(&customer),
        Some(json!({ "rentStartedAt": "2024-06-01T09:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["carId"], car["id"]);
    assert_eq!(body["rentEndedAt"], "2024-06-02T09:00:00Z");

    let (status, body) = send(
        &app,
        "POST",
        &uri,
        Some(&customer),
        Some(json!({ "rentStartedAt": "2024-06-01T18:00:00Z", "rentEndedAt": "2024-06-03T00:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_error(&body, "CarAlreadyRentedError");
    assert_eq!(body["error"]["details"]["carId"], car["id"]);
}

#[tokio::test]
async fn test_rent_car_invalid_window() {
    let app = setup_test_app();
    let admin = admin_token(&app).await;
    let customer = customer_token(&app).await;
    let car = create_car(&app, &admin, "Mazda RX4", "SMALL").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/v1/cars/{}/rent", car["id"]),
        Some(&customer),
        Some(json!({ "rentStartedAt": "2024-06-02T00:00:00Z", "rentEndedAt": "2024-06-01T00:00:00Z" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_error(&body, "ValidationError");
}

#[tokio::test]
async fn test_rent_car_requires_customer() {
    let app = setup_test_app();
    let admin = admin_token(&app).await;
    let car = create_car(&app, &admin, "Mazda RX4", "SMALL").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/v1/cars/{}/rent", car["id"]),
        Some(&admin),
        Some(json!({ "rentStartedAt": "2024-06-01T00:00:00Z" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error(&body, "InsufficientAccessError");
    assert_eq!(body["error"]["details"]["role"], "ADMIN");
}

#[tokio::test]
async fn test_rent_unknown_car() {
    let app = setup_test_app();
    let customer = customer_token(&app).await;

    for id in ["404", "abc"] {
        let (status, body) = send(
            &app,
            "POST",
            &format!("/v1/cars/{}/rent", id),
            Some(&customer),
            Some(json!({ "rentStartedAt": "2024-06-01T00:00:00Z" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Car not found");
    }
}
