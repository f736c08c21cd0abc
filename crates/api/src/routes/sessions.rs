//! Route definitions for the `/sessions` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::sessions;
use crate::state::AppState;

/// Routes mounted at `/sessions`. All require auth.
///
/// ```text
/// GET    /      -> list_sessions
/// DELETE /      -> terminate_other_sessions
/// DELETE /{id}  -> terminate_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(sessions::list_sessions).delete(sessions::terminate_other_sessions),
        )
        .route("/{id}", delete(sessions::terminate_session))
}
