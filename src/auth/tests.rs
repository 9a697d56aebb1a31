//! Tests for the auth module
//!
//! Exercises registration and login end-to-end against an in-memory
//! database, including token issuing and the duplicate-account status.

use axum::{
    body::Body,
    extract::Extension,
    http::{Request as HttpRequest, StatusCode},
    response::Response,
    Router,
};
use tower::ServiceExt;

use super::codec::TokenCodec;
use super::routes::auth_routes;
use crate::testing::{test_state, TEST_TOKEN_KEY};

async fn test_router() -> Router {
    let state = test_state().await;
    auth_routes().layer(Extension(state))
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

fn post_json(path: &str, body: serde_json::Value) -> HttpRequest<Body> {
    HttpRequest::post(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn test_register_then_login_round_trip() {
    let router = test_router().await;

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/register",
            serde_json::json!({ "username": "t", "email": "t@t.com", "password": "p" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    let token = body["token"].as_str().expect("token field");
    let registered_id = body["user"]["id"].as_i64().expect("user id");

    let codec = TokenCodec::new(TEST_TOKEN_KEY).expect("codec");
    let claim = codec.decode(token).expect("issued token decodes");
    assert_eq!(claim.user_id, registered_id);
    assert_eq!(claim.email, "t@t.com");
    assert_eq!(claim.username, "t");

    let response = router
        .oneshot(post_json(
            "/api/login",
            serde_json::json!({ "email": "t@t.com", "password": "p" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let fresh = body["token"].as_str().expect("token field");
    let claim = codec.decode(fresh).expect("fresh token decodes");
    assert_eq!(claim.user_id, registered_id);
}

#[tokio::test]
async fn test_register_duplicate_is_401() {
    // duplicates report 401 here while the sources route uses 409; the
    // mismatch is observed behavior and intentionally kept
    let router = test_router().await;
    let payload = serde_json::json!({ "username": "t", "email": "t@t.com", "password": "p" });

    let response = router
        .clone()
        .oneshot(post_json("/api/register", payload.clone()))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .oneshot(post_json("/api/register", payload))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["message"],
        "User already exists. Please login"
    );
}

#[tokio::test]
async fn test_register_missing_fields_is_400() {
    let response = test_router()
        .await
        .oneshot(post_json(
            "/api/register",
            serde_json::json!({ "username": "", "email": "t@t.com", "password": "p" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_wrong_password_is_401() {
    let router = test_router().await;

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/register",
            serde_json::json!({ "username": "t", "email": "t@t.com", "password": "p" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .oneshot(post_json(
            "/api/login",
            serde_json::json!({ "email": "t@t.com", "password": "wrong" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_by_username() {
    let router = test_router().await;

    router
        .clone()
        .oneshot(post_json(
            "/api/register",
            serde_json::json!({ "username": "t", "email": "t@t.com", "password": "p" }),
        ))
        .await
        .expect("response");

    let response = router
        .oneshot(post_json(
            "/api/login",
            serde_json::json!({ "username": "t", "password": "p" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_user_serialization_hides_credentials() {
    let response = test_router()
        .await
        .oneshot(post_json(
            "/api/register",
            serde_json::json!({ "username": "t", "email": "t@t.com", "password": "p" }),
        ))
        .await
        .expect("response");

    let body = body_json(response).await;
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("token").is_none());
}
