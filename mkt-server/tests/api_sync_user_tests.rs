//! Integration tests for the session-sync endpoint
mod common;

use crate::common::{StaticProvider, count_users, create_test_state, mint_token};

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use mkt_server::build_router;

fn sync_request(token: Option<&str>, body: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri("/api/auth/sync-user");

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn test_sync_user_without_session_returns_401_and_writes_nothing() {
    let state = create_test_state(Arc::new(StaticProvider::failing()), None).await;
    let app = build_router(state.clone());

    let response = app.oneshot(sync_request(None, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json.get("error").is_some());

    assert_eq!(count_users(&state.pool).await, 0);
}

#[tokio::test]
async fn test_sync_user_with_garbage_token_returns_401() {
    let state = create_test_state(Arc::new(StaticProvider::failing()), None).await;
    let app = build_router(state.clone());

    let response = app
        .oneshot(sync_request(Some("not-a-jwt"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(count_users(&state.pool).await, 0);
}

#[tokio::test]
async fn test_sync_user_creates_record_with_default_role() {
    let state = create_test_state(Arc::new(StaticProvider::failing()), None).await;
    let app = build_router(state.clone());
    let token = mint_token("ext-1", Some("a@x.com"));

    let response = app.oneshot(sync_request(Some(&token), None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["user"]["email"], "a@x.com");
    assert_eq!(json["user"]["role"], "CLIENT");
    // Name falls back to the email local-part
    assert_eq!(json["user"]["name"], "a");

    assert_eq!(count_users(&state.pool).await, 1);
}

#[tokio::test]
async fn test_sync_user_honors_role_override_at_creation() {
    let state = create_test_state(Arc::new(StaticProvider::failing()), None).await;
    let app = build_router(state.clone());
    let token = mint_token("ext-1", Some("a@x.com"));

    let response = app
        .oneshot(sync_request(Some(&token), Some(r#"{"role":"PROFESSIONAL"}"#)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["user"]["role"], "PROFESSIONAL");
}

#[tokio::test]
async fn test_sync_user_is_idempotent() {
    let state = create_test_state(Arc::new(StaticProvider::failing()), None).await;
    let token = mint_token("ext-1", Some("a@x.com"));

    let first = build_router(state.clone())
        .oneshot(sync_request(Some(&token), None))
        .await
        .unwrap();
    let first_json: serde_json::Value = serde_json::from_slice(
        &first.into_body().collect().await.unwrap().to_bytes(),
    )
    .unwrap();

    let second = build_router(state.clone())
        .oneshot(sync_request(Some(&token), None))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    let second_json: serde_json::Value = serde_json::from_slice(
        &second.into_body().collect().await.unwrap().to_bytes(),
    )
    .unwrap();

    assert_eq!(first_json["user"]["id"], second_json["user"]["id"]);
    assert_eq!(count_users(&state.pool).await, 1);
}

#[tokio::test]
async fn test_sync_user_role_override_ignored_for_existing_record() {
    let state = create_test_state(Arc::new(StaticProvider::failing()), None).await;
    let token = mint_token("ext-1", Some("a@x.com"));

    build_router(state.clone())
        .oneshot(sync_request(Some(&token), None))
        .await
        .unwrap();

    let response = build_router(state.clone())
        .oneshot(sync_request(Some(&token), Some(r#"{"role":"PROFESSIONAL"}"#)))
        .await
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(
        &response.into_body().collect().await.unwrap().to_bytes(),
    )
    .unwrap();

    // Role is set once at creation and never mutated afterwards
    assert_eq!(json["user"]["role"], "CLIENT");
}

#[tokio::test]
async fn test_sync_user_token_without_email_returns_400() {
    let state = create_test_state(Arc::new(StaticProvider::failing()), None).await;
    let app = build_router(state.clone());
    let token = mint_token("ext-1", None);

    let response = app.oneshot(sync_request(Some(&token), None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(count_users(&state.pool).await, 0);
}
