//! Handlers for the `/sessions` resource: the caller's signed-in devices.

use axum::extract::{Path, State};
use axum::Json;
use numisroma_core::types::DbId;
use numisroma_db::models::session::SessionResponse;
use serde::Serialize;

use crate::auth::sessions;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionsResponse {
    pub sessions: Vec<SessionResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminateOthersResponse {
    pub message: String,
    pub terminated_count: u64,
}

/// GET /api/sessions
///
/// Active sessions, most recently used first. The one making this request
/// has `isCurrentSession: true`.
pub async fn list_sessions(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<SessionsResponse>> {
    let sessions = sessions::list_active(&state.pool, auth_user.user_id, &auth_user.token).await?;
    Ok(Json(SessionsResponse { sessions }))
}

/// DELETE /api/sessions/{session_id}
pub async fn terminate_session(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    sessions::terminate(&state.pool, session_id, auth_user.user_id, &auth_user.token).await?;
    Ok(Json(MessageResponse::new("Session terminated successfully")))
}

/// DELETE /api/sessions
///
/// Sign out everywhere except here.
pub async fn terminate_other_sessions(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<TerminateOthersResponse>> {
    let terminated_count =
        sessions::terminate_all_others(&state.pool, auth_user.user_id, &auth_user.token).await?;

    Ok(Json(TerminateOthersResponse {
        message: "All other sessions terminated successfully".to_string(),
        terminated_count,
    }))
}
