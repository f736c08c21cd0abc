//! Route definitions for public user profiles.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`. Auth is optional.
///
/// ```text
/// GET /{id}              -> get_profile
/// GET /{id}/collections  -> list_user_collections
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(users::get_profile))
        .route("/{id}/collections", get(users::list_user_collections))
}
