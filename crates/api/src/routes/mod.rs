pub mod auth;
pub mod collections;
pub mod follows;
pub mod health;
pub mod messages;
pub mod sessions;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /auth/register, /auth/login                      public
/// /auth/logout, /auth/me, /auth/change-password,
/// /auth/change-username, /auth/profile,
/// /auth/delete-account                             requires auth
///
/// /sessions                                        list, terminate others
/// /sessions/{id}                                   terminate one
///
/// /users/{id}                                      public profile (optional auth)
/// /users/{id}/collections                          visible collections
///
/// /follows/{user_id}                               follow, unfollow
/// /follows/{user_id}/followers|following           public lists
///
/// /collections                                     own list, create
/// /collections/{id}                                get, update, delete
///
/// /messages                                        send
/// /messages/conversations/{user_id}                thread
/// /messages/{id}                                   get, delete
/// /messages/{id}/read                              mark read
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/sessions", sessions::router())
        .nest("/users", users::router())
        .nest("/follows", follows::router())
        .nest("/collections", collections::router())
        .nest("/messages", messages::router())
}
