//! Route definitions for the `/auth` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /register          -> register
/// POST /login             -> login
/// POST /logout            -> logout (requires auth)
/// GET  /me                -> me (requires auth)
/// POST /change-password   -> change_password (requires auth)
/// POST /change-username   -> change_username (requires auth)
/// PUT  /profile           -> update_profile (requires auth)
/// POST /delete-account    -> delete_account (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/change-password", post(auth::change_password))
        .route("/change-username", post(auth::change_username))
        .route("/profile", put(auth::update_profile))
        .route("/delete-account", post(auth::delete_account))
}
