//! Handlers for the follow graph.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use numisroma_core::authz::ensure_can_follow;
use numisroma_core::error::CoreError;
use numisroma_core::types::DbId;
use numisroma_db::repositories::FollowRepo;

use crate::error::AppResult;
use crate::handlers::users::find_user;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// POST /api/follows/{user_id}
pub async fn follow(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_can_follow(auth_user.user_id, user_id)?;
    find_user(&state, user_id).await?;

    let edge = FollowRepo::create(&state.pool, auth_user.user_id, user_id)
        .await?
        .ok_or(CoreError::AlreadyFollowing)?;

    tracing::info!(follower_id = auth_user.user_id, following_id = user_id, "User followed");

    Ok((StatusCode::CREATED, Json(DataResponse { data: edge })))
}

/// DELETE /api/follows/{user_id}
pub async fn unfollow(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !FollowRepo::delete(&state.pool, auth_user.user_id, user_id).await? {
        return Err(CoreError::NotFollowing.into());
    }

    tracing::info!(follower_id = auth_user.user_id, following_id = user_id, "User unfollowed");

    Ok(Json(MessageResponse::new("Unfollowed successfully")))
}

/// GET /api/follows/{user_id}/followers
pub async fn list_followers(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_user(&state, user_id).await?;
    let followers = FollowRepo::list_followers(&state.pool, user_id).await?;
    Ok(Json(DataResponse { data: followers }))
}

/// GET /api/follows/{user_id}/following
pub async fn list_following(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_user(&state, user_id).await?;
    let following = FollowRepo::list_following(&state.pool, user_id).await?;
    Ok(Json(DataResponse { data: following }))
}
