//! In-process router checks that need no listening socket.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use tasktracker::auth::jwt::{Claims, encode_token};
use tasktracker::store::MemoryStore;

fn bearer(secret: &str) -> String {
    let claims = Claims::new(uuid::Uuid::now_v7(), chrono::Duration::minutes(5));
    format!("Bearer {}", encode_token(&claims, secret).unwrap())
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let mut config = common::test_config();
    config.max_body_size = 1024;
    let secret = config.jwt_secret.clone();
    let app = tasktracker::build_app(Arc::new(MemoryStore::new()), config);

    let body = serde_json::json!({ "name": "big", "description": "x".repeat(4096) }).to_string();
    let resp = app
        .oneshot(
            Request::post("/api/projects")
                .header(header::AUTHORIZATION, bearer(&secret))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn token_signed_with_other_secret_is_unauthorized() {
    let app = tasktracker::build_app(Arc::new(MemoryStore::new()), common::test_config());

    let resp = app
        .oneshot(
            Request::get("/api/projects")
                .header(header::AUTHORIZATION, bearer("some-other-secret"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_token_for_new_user_lists_nothing() {
    let config = common::test_config();
    let secret = config.jwt_secret.clone();
    let app = tasktracker::build_app(Arc::new(MemoryStore::new()), config);

    let resp = app
        .oneshot(
            Request::get("/api/projects")
                .header(header::AUTHORIZATION, bearer(&secret))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"[]");
}

#[tokio::test]
async fn token_for_unknown_user_cannot_create_projects() {
    let config = common::test_config();
    let secret = config.jwt_secret.clone();
    let app = tasktracker::build_app(Arc::new(MemoryStore::new()), config);

    let body = serde_json::json!({ "name": "Launch", "description": "v1" }).to_string();
    let resp = app
        .oneshot(
            Request::post("/api/projects")
                .header(header::AUTHORIZATION, bearer(&secret))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
