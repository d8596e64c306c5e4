//! End-to-end checks of the HTTP surface, driven through the router with
//! `tower::ServiceExt::oneshot`.

use std::net::SocketAddr;

use axum::body::Body;
use axum::Router;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use bakery_daemon::auth::CredentialGate;
use bakery_daemon::database::Database;
use bakery_daemon::http_server;
use bakery_daemon::ServiceState;

const KEY: &str = "test-api-key";

async fn app() -> (Router, Database) {
    let db = Database::in_memory().await.unwrap();
    let state = ServiceState::new(db.clone(), CredentialGate::new(KEY));
    let config = http_server::Config::new(SocketAddr::from(([127, 0, 0, 1], 0)), Vec::new());
    (http_server::router(&config, state), db)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    key: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Option<Value>) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(key) = key {
        request = request.header(AUTHORIZATION, key);
    }
    let request = match body {
        Some(body) => request
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        None
    } else {
        serde_json::from_slice(&bytes).ok()
    };
    (status, body)
}

async fn create_bagel(app: &Router) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v0/bakery-items",
        Some(KEY),
        Some(json!({"name": "Bagel", "price": 1.5, "quantityAvailable": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body.unwrap()
}

#[tokio::test]
async fn test_missing_credential_is_rejected() {
    let (app, _db) = app().await;

    let (status, body) = send(&app, Method::GET, "/api/v0/bakery-items", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body.unwrap()["error"], "Missing Authorization Key header");
}

#[tokio::test]
async fn test_empty_credential_counts_as_missing() {
    let (app, _db) = app().await;

    let (status, body) = send(&app, Method::GET, "/api/v0/orders", Some(""), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body.unwrap()["error"], "Missing Authorization Key header");
}

#[tokio::test]
async fn test_wrong_credential_is_rejected() {
    let (app, _db) = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v0/orders",
        Some("not-the-key"),
        Some(json!({"bakeryItemId": 1, "quantity": 1, "customerName": "A"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body.unwrap()["error"], "Invalid API key");

    // Nothing was written.
    let (_, body) = send(&app, Method::GET, "/api/v0/orders", Some(KEY), None).await;
    assert_eq!(body.unwrap(), json!([]));
}

#[tokio::test]
async fn test_status_routes_are_open() {
    let (app, _db) = app().await;

    for path in ["/_status/livez", "/_status/readyz", "/_status/version"] {
        let (status, _) = send(&app, Method::GET, path, None, None).await;
        assert_eq!(status, StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn test_bagel_lifecycle() {
    let (app, _db) = app().await;

    let created = create_bagel(&app).await;
    assert_eq!(created["version"], 0);
    assert_eq!(created["price"], 1.5);
    let id = created["id"].as_i64().unwrap();
    let path = format!("/api/v0/bakery-items/{id}");

    let mut sold = created.clone();
    sold["quantityAvailable"] = json!(8);
    let (status, body) = send(&app, Method::PUT, &path, Some(KEY), Some(sold)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_none());

    let (status, body) = send(&app, Method::GET, &path, Some(KEY), None).await;
    assert_eq!(status, StatusCode::OK);
    let stored = body.unwrap();
    assert_eq!(stored["version"], 1);
    assert_eq!(stored["quantityAvailable"], 8);

    // A writer still holding version 0 is refused.
    let mut stale = created.clone();
    stale["quantityAvailable"] = json!(5);
    let (status, body) = send(&app, Method::PUT, &path, Some(KEY), Some(stale)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body.unwrap()["error"],
        format!("An error occurred while updating the bakery item with id {id}.")
    );

    let (_, body) = send(&app, Method::GET, &path, Some(KEY), None).await;
    assert_eq!(body.unwrap()["quantityAvailable"], 8);

    let (status, body) = send(&app, Method::GET, "/api/v0/bakery-items", Some(KEY), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::DELETE, &path, Some(KEY), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, &path, Some(KEY), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_absent_bakery_item_is_not_found() {
    let (app, _db) = app().await;
    let path = "/api/v0/bakery-items/42";

    let (status, _) = send(&app, Method::GET, path, Some(KEY), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let body = json!({"id": 42, "name": "Rye", "price": 4.0, "quantityAvailable": 1, "version": 0});
    let (status, _) = send(&app, Method::PUT, path, Some(KEY), Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, path, Some(KEY), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_validation_failures_are_bad_requests() {
    let (app, _db) = app().await;
    let created = create_bagel(&app).await;
    let id = created["id"].as_i64().unwrap();

    // Non-positive id.
    let (status, _) = send(&app, Method::GET, "/api/v0/bakery-items/0", Some(KEY), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Body id disagrees with the path.
    let other = format!("/api/v0/bakery-items/{}", id + 1);
    let (status, body) = send(&app, Method::PUT, &other, Some(KEY), Some(created)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["error"], "Id mismatch");

    // No body at all.
    let (status, _) = send(&app, Method::POST, "/api/v0/bakery-items", Some(KEY), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // A body that is not a record.
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v0/orders",
        Some(KEY),
        Some(json!("not an order")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_order_lifecycle() {
    let (app, _db) = app().await;

    // Orders may point at items that do not exist.
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v0/orders",
        Some(KEY),
        Some(json!({
            "bakeryItemId": 999,
            "quantity": 2,
            "orderDate": "2023-11-14T22:13:20Z",
            "customerName": "A"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created = body.unwrap();
    assert_eq!(created["version"], 0);
    assert_eq!(created["orderDate"], "2023-11-14T22:13:20Z");
    let id = created["id"].as_i64().unwrap();
    let path = format!("/api/v0/orders/{id}");

    let mut bigger = created.clone();
    bigger["quantity"] = json!(3);
    let (status, _) = send(&app, Method::PUT, &path, Some(KEY), Some(bigger)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &path, Some(KEY), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["version"], 1);

    let (status, _) = send(&app, Method::DELETE, &path, Some(KEY), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &path, Some(KEY), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body.unwrap()["error"],
        format!("Order with id {id} not found.")
    );

    let (status, _) = send(&app, Method::PUT, &path, Some(KEY), Some(created)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &path, Some(KEY), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_racing_updates_one_wins() {
    let (app, _db) = app().await;
    let created = create_bagel(&app).await;
    let path = format!("/api/v0/bakery-items/{}", created["id"]);

    let mut first = created.clone();
    first["quantityAvailable"] = json!(7);
    let mut second = created.clone();
    second["quantityAvailable"] = json!(6);

    let (a, b) = tokio::join!(
        send(&app, Method::PUT, &path, Some(KEY), Some(first)),
        send(&app, Method::PUT, &path, Some(KEY), Some(second)),
    );
    let mut statuses = [a.0, b.0];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::NO_CONTENT, StatusCode::CONFLICT]);

    let (_, body) = send(&app, Method::GET, &path, Some(KEY), None).await;
    assert_eq!(body.unwrap()["version"], 1);
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let (app, db) = app().await;
    db.close().await;

    let (status, body) = send(&app, Method::GET, "/api/v0/bakery-items", Some(KEY), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body.unwrap()["error"],
        "Internal server error: An error occurred while retrieving all bakery items."
    );

    let (status, _) = send(&app, Method::GET, "/_status/readyz", None, None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (app, _db) = app().await;
    let (status, _) = send(&app, Method::GET, "/nowhere", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
