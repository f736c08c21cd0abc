//! Required-gate rejections that happen before any database access.
//!
//! The app runs over a lazily connecting pool that never reaches a server,
//! so these run without `DATABASE_URL`.

mod common;

use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::{Method, Request, StatusCode};
use chrono::Utc;
use common::{assert_error, build_db_free_app, get, get_auth, send, TEST_SECRET};
use jsonwebtoken::{encode, EncodingKey, Header};
use numisroma_api::auth::jwt::Claims;

fn sign(claims: &Claims, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn claims(exp_offset_secs: i64) -> Claims {
    let now = Utc::now().timestamp();
    Claims {
        user_id: 1,
        iat: now,
        exp: now + exp_offset_secs,
        jti: "test-jti".to_string(),
    }
}

#[tokio::test]
async fn missing_header_is_no_token_provided() {
    let response = get(build_db_free_app(), "/api/auth/me").await;
    let json = assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHENTICATED").await;
    assert_eq!(json["error"], "No token provided");
}

#[tokio::test]
async fn header_without_token_is_malformed() {
    for value in ["Bearer", "Bearer "] {
        let request = Request::builder()
            .method(Method::GET)
            .uri("/api/sessions")
            .header(AUTHORIZATION, value)
            .body(Body::empty())
            .unwrap();
        let response = send(build_db_free_app(), request).await;
        let json = assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHENTICATED").await;
        assert_eq!(json["error"], "Malformed token");
    }
}

#[tokio::test]
async fn garbage_token_is_invalid() {
    let response = get_auth(build_db_free_app(), "/api/auth/me", "not-a-jwt").await;
    let json = assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHENTICATED").await;
    assert_eq!(json["error"], "Invalid token");
}

#[tokio::test]
async fn expired_token_is_invalid() {
    let token = sign(&claims(-300), TEST_SECRET);
    let response = get_auth(build_db_free_app(), "/api/sessions", &token).await;
    let json = assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHENTICATED").await;
    assert_eq!(json["error"], "Invalid token");
}

#[tokio::test]
async fn token_signed_with_another_secret_is_invalid() {
    let token = sign(&claims(3600), "some-other-secret");
    let response = get_auth(build_db_free_app(), "/api/auth/me", &token).await;
    let json = assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHENTICATED").await;
    assert_eq!(json["error"], "Invalid token");
}
