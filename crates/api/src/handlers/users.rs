//! Public user profiles, personalised when the viewer is signed in.

use axum::extract::{Path, State};
use axum::Json;
use numisroma_core::error::CoreError;
use numisroma_core::types::{DbId, Timestamp};
use numisroma_db::models::collection::Collection;
use numisroma_db::models::user::User;
use numisroma_db::repositories::{CollectionRepo, FollowRepo, UserRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Profile as seen by other users. Email is never exposed here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub id: DbId,
    pub username: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: Timestamp,
    pub followers_count: i64,
    pub following_count: i64,
    pub collections_count: i64,
    /// Present only for a signed-in viewer looking at someone else.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_following: Option<bool>,
}

/// GET /api/users/{id}
pub async fn get_profile(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<PublicProfile>> {
    let user = find_user(&state, user_id).await?;
    let (followers_count, following_count) = FollowRepo::counts(&state.pool, user.id).await?;
    let is_owner = viewer.user_id() == Some(user.id);
    let collections_count = CollectionRepo::count_for_user(&state.pool, user.id, is_owner).await?;

    let is_following = match viewer.user_id() {
        Some(viewer_id) if viewer_id != user.id => {
            Some(FollowRepo::exists(&state.pool, viewer_id, user.id).await?)
        }
        _ => None,
    };

    Ok(Json(PublicProfile {
        id: user.id,
        username: user.username,
        avatar_url: user.avatar_url,
        bio: user.bio,
        created_at: user.created_at,
        followers_count,
        following_count,
        collections_count,
        is_following,
    }))
}

/// GET /api/users/{id}/collections
///
/// Public collections, or all of them when the owner is asking.
pub async fn list_user_collections(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Collection>>>> {
    let user = find_user(&state, user_id).await?;
    let include_private = viewer.user_id() == Some(user.id);
    let collections = CollectionRepo::list_by_owner(&state.pool, user.id, include_private).await?;
    Ok(Json(DataResponse { data: collections }))
}

pub(crate) async fn find_user(state: &AppState, user_id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))
}
