//! Route definitions for coin collections.

use axum::routing::get;
use axum::Router;

use crate::handlers::collections;
use crate::state::AppState;

/// Routes mounted at `/collections`.
///
/// ```text
/// GET    /      -> list_my_collections (requires auth)
/// POST   /      -> create_collection (requires auth)
/// GET    /{id}  -> get_collection (optional auth)
/// PUT    /{id}  -> update_collection (owner only)
/// DELETE /{id}  -> delete_collection (owner only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(collections::list_my_collections).post(collections::create_collection),
        )
        .route(
            "/{id}",
            get(collections::get_collection)
                .put(collections::update_collection)
                .delete(collections::delete_collection),
        )
}
