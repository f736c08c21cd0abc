//! Route definitions for the follow graph.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::follows;
use crate::state::AppState;

/// Routes mounted at `/follows`.
///
/// ```text
/// POST   /{user_id}            -> follow (requires auth)
/// DELETE /{user_id}            -> unfollow (requires auth)
/// GET    /{user_id}/followers  -> list_followers
/// GET    /{user_id}/following  -> list_following
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{user_id}", post(follows::follow).delete(follows::unfollow))
        .route("/{user_id}/followers", get(follows::list_followers))
        .route("/{user_id}/following", get(follows::list_following))
}
