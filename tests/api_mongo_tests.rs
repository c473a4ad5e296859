// End-to-end API tests against a live MongoDB instance.
//
// Ignored by default; run with a local server:
//
//     MONGODB_URI=mongodb://localhost:27017 cargo test -- --ignored
//
// Each test works in its own throwaway database so runs don't interfere.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use bson::oid::ObjectId;
use byob_meetings::{create_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn test_app() -> (Router, mongodb::Database) {
    let uri = std::env::var("MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let client = mongodb::Client::with_uri_str(&uri).await.unwrap();
    let database = client.database(&format!("byob-test-{}", ObjectId::new().to_hex()));
    (create_router(AppState::new(&database)), database)
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_create_update_delete_scenario() {
    let (app, database) = test_app().await;

    // Create
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/meetings",
            json!({
                "name": "Test Group",
                "wine": "Cabernet Sauvignon",
                "location": "Test Venue",
                "date": "2025-08-10T18:00:00Z",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["name"], "Test Group");
    assert_eq!(created["location"], "Test Venue");
    let id = created["_id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 24, "_id should be an ObjectId hex string");

    // Patch only the location; every other field must survive the merge
    let response = app
        .clone()
        .oneshot(json_request(
            Method::PATCH,
            &format!("/api/meetings/{}", id),
            json!({ "location": "New Venue" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["location"], "New Venue");
    assert_eq!(updated["name"], "Test Group");
    assert_eq!(updated["wine"], "Cabernet Sauvignon");
    assert_eq!(updated["_id"], id.as_str());

    // List contains exactly the one record
    let response = app
        .clone()
        .oneshot(empty_request(Method::GET, "/api/meetings"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["_id"], id.as_str());

    // Delete
    let response = app
        .clone()
        .oneshot(empty_request(
            Method::DELETE,
            &format!("/api/meetings/{}", id),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let deleted = body_json(response).await;
    assert_eq!(deleted["message"], "Meeting successfully deleted");

    // Gone: a follow-up patch sees not-found, and the list is empty again
    let response = app
        .clone()
        .oneshot(json_request(
            Method::PATCH,
            &format!("/api/meetings/{}", id),
            json!({ "location": "Anywhere" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(empty_request(Method::GET, "/api/meetings"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);

    database.drop(None).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_list_empty_store_returns_empty_array() {
    let (app, database) = test_app().await;

    let response = app
        .oneshot(empty_request(Method::GET, "/api/meetings"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!([]));

    database.drop(None).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_update_nonexistent_returns_404() {
    let (app, database) = test_app().await;

    let response = app
        .oneshot(json_request(
            Method::PATCH,
            &format!("/api/meetings/{}", ObjectId::new().to_hex()),
            json!({ "location": "New Venue" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Meeting not found");

    database.drop(None).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_delete_nonexistent_returns_404() {
    let (app, database) = test_app().await;

    let response = app
        .oneshot(empty_request(
            Method::DELETE,
            &format!("/api/meetings/{}", ObjectId::new().to_hex()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Meeting not found");

    database.drop(None).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_empty_patch_is_a_no_op() {
    let (app, database) = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/meetings",
            json!({
                "name": "Quiet Group",
                "wine": "Riesling",
                "location": "Old Venue",
                "date": "2025-09-01T19:00:00Z",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["_id"].as_str().unwrap();

    let response = app
        .oneshot(json_request(
            Method::PATCH,
            &format!("/api/meetings/{}", id),
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Quiet Group");
    assert_eq!(body["location"], "Old Venue");

    database.drop(None).await.unwrap();
}
