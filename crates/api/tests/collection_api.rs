//! HTTP-level integration tests for collections and their visibility rules.

mod common;

use axum::http::StatusCode;
use common::{
    assert_error, body_json, build_test_app, delete_auth, get, get_auth, post_json_auth,
    put_json_auth, register, user_id,
};
use serde_json::json;
use sqlx::PgPool;

async fn create(app: axum::Router, token: &str, name: &str, is_public: bool) -> i64 {
    let response = post_json_auth(
        app,
        "/api/collections",
        token,
        json!({ "name": name, "description": "Imperial bronzes", "isPublic": is_public }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn owner_lists_public_and_private(pool: PgPool) {
    let app = build_test_app(pool);
    let token = register(app.clone(), "nero").await;
    create(app.clone(), &token, "Sestertii", true).await;
    create(app.clone(), &token, "Aurei", false).await;

    let response = get_auth(app, "/api/collections", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn private_collections_are_visible_only_to_their_owner(pool: PgPool) {
    let app = build_test_app(pool);
    let owner = register(app.clone(), "otho").await;
    let other = register(app.clone(), "vitellius").await;
    let owner_id = user_id(app.clone(), &owner).await;
    let private_id = create(app.clone(), &owner, "Hoard", false).await;
    let public_id = create(app.clone(), &owner, "Showcase", true).await;
    let private_uri = format!("/api/collections/{private_id}");

    let response = get(app.clone(), &private_uri).await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
    let response = get_auth(app.clone(), &private_uri, &other).await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
    let response = get_auth(app.clone(), &private_uri, &owner).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app.clone(), &format!("/api/collections/{public_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let listing_uri = format!("/api/users/{owner_id}/collections");
    let as_other = body_json(get_auth(app.clone(), &listing_uri, &other).await).await;
    assert_eq!(as_other["data"].as_array().unwrap().len(), 1);
    assert_eq!(as_other["data"][0]["name"], "Showcase");

    let as_owner = body_json(get_auth(app, &listing_uri, &owner).await).await;
    assert_eq!(as_owner["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_the_owner_may_update_or_delete(pool: PgPool) {
    let app = build_test_app(pool);
    let owner = register(app.clone(), "galba").await;
    let other = register(app.clone(), "piso").await;
    let id = create(app.clone(), &owner, "Denarii", true).await;
    let uri = format!("/api/collections/{id}");

    let response = put_json_auth(app.clone(), &uri, &other, json!({ "name": "Mine now" })).await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
    let response = delete_auth(app.clone(), &uri, &other).await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;

    let response = put_json_auth(app.clone(), &uri, &owner, json!({ "isPublic": false })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["name"], "Denarii");
    assert_eq!(data["isPublic"], false);

    let response = delete_auth(app.clone(), &uri, &owner).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &uri, &owner).await;
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn blank_name_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let token = register(app.clone(), "macrinus").await;

    let response = post_json_auth(app, "/api/collections", &token, json!({ "name": "   " })).await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn collections_default_to_public(pool: PgPool) {
    let app = build_test_app(pool);
    let token = register(app.clone(), "elagabalus").await;

    let response = post_json_auth(app, "/api/collections", &token, json!({ "name": "Antoniniani" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["isPublic"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn profile_counts_private_collections_only_for_the_owner(pool: PgPool) {
    let app = build_test_app(pool);
    let owner = register(app.clone(), "pertinax").await;
    let other = register(app.clone(), "julianus").await;
    let owner_id = user_id(app.clone(), &owner).await;
    create(app.clone(), &owner, "Auctioned", true).await;
    create(app.clone(), &owner, "Vault", false).await;
    let profile_uri = format!("/api/users/{owner_id}");

    let anonymous = body_json(get(app.clone(), &profile_uri).await).await;
    assert_eq!(anonymous["collectionsCount"], 1);
    let as_other = body_json(get_auth(app.clone(), &profile_uri, &other).await).await;
    assert_eq!(as_other["collectionsCount"], 1);
    let as_owner = body_json(get_auth(app, &profile_uri, &owner).await).await;
    assert_eq!(as_owner["collectionsCount"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn names_are_stored_trimmed(pool: PgPool) {
    let app = build_test_app(pool);
    let token = register(app.clone(), "severus").await;
    let id = create(app.clone(), &token, "  Legionary denarii  ", true).await;
    let uri = format!("/api/collections/{id}");

    let created = body_json(get_auth(app.clone(), &uri, &token).await).await;
    assert_eq!(created["data"]["name"], "Legionary denarii");

    let response = put_json_auth(app, &uri, &token, json!({ "name": "\tSeveran mint " })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Severan mint");
}
