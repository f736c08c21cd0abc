//! Route definitions for direct messages. All require auth.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::messages;
use crate::state::AppState;

/// Routes mounted at `/messages`.
///
/// ```text
/// POST   /                          -> send_message
/// GET    /conversations/{user_id}   -> get_conversation
/// GET    /{id}                      -> get_message (participants)
/// DELETE /{id}                      -> delete_message (sender only)
/// POST   /{id}/read                 -> mark_read (recipient only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(messages::send_message))
        .route("/conversations/{user_id}", get(messages::get_conversation))
        .route(
            "/{id}",
            get(messages::get_message).delete(messages::delete_message),
        )
        .route("/{id}/read", post(messages::mark_read))
}
