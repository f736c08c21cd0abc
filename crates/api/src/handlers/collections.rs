//! Handlers for coin collections.
//!
//! Reads honour visibility (public, or the owner); writes are owner-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use numisroma_core::authz::{ensure_can_view, ensure_owner};
use numisroma_core::error::CoreError;
use numisroma_core::types::DbId;
use numisroma_db::models::collection::{Collection, CreateCollection, UpdateCollection};
use numisroma_db::repositories::CollectionRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum length of a collection name.
const MAX_NAME_LENGTH: usize = 100;

/// Maximum length of a collection description.
const MAX_DESCRIPTION_LENGTH: usize = 1_000;

/// GET /api/collections
///
/// The caller's own collections, private ones included.
pub async fn list_my_collections(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let collections = CollectionRepo::list_by_owner(&state.pool, auth_user.user_id, true).await?;
    Ok(Json(DataResponse { data: collections }))
}

/// POST /api/collections
pub async fn create_collection(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateCollection>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name)?;
    validate_description(input.description.as_deref())?;
    input.name = input.name.trim().to_owned();

    let collection = CollectionRepo::create(&state.pool, auth_user.user_id, &input).await?;

    tracing::info!(
        collection_id = collection.id,
        user_id = auth_user.user_id,
        name = %collection.name,
        "Collection created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: collection })))
}

/// GET /api/collections/{id}
pub async fn get_collection(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    Path(collection_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let collection = find_collection(&state, collection_id).await?;
    ensure_can_view(
        collection.user_id,
        collection.is_public,
        viewer.user_id(),
        "collection",
    )?;
    Ok(Json(DataResponse { data: collection }))
}

/// PUT /api/collections/{id}
pub async fn update_collection(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(collection_id): Path<DbId>,
    Json(mut input): Json<UpdateCollection>,
) -> AppResult<impl IntoResponse> {
    let existing = find_collection(&state, collection_id).await?;
    ensure_owner(existing.user_id, auth_user.user_id, "collection")?;

    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    validate_description(input.description.as_deref())?;
    input.name = input.name.map(|name| name.trim().to_owned());

    let collection = CollectionRepo::update(&state.pool, collection_id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Collection",
            id: collection_id,
        })?;

    Ok(Json(DataResponse { data: collection }))
}

/// DELETE /api/collections/{id}
pub async fn delete_collection(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(collection_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = find_collection(&state, collection_id).await?;
    ensure_owner(existing.user_id, auth_user.user_id, "collection")?;

    CollectionRepo::delete(&state.pool, collection_id).await?;

    tracing::info!(collection_id, user_id = auth_user.user_id, "Collection deleted");

    Ok(StatusCode::NO_CONTENT)
}

async fn find_collection(state: &AppState, collection_id: DbId) -> AppResult<Collection> {
    CollectionRepo::find_by_id(&state.pool, collection_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Collection",
            id: collection_id,
        }))
}

fn validate_name(name: &str) -> Result<(), CoreError> {
    let len = name.trim().chars().count();
    if len == 0 {
        return Err(CoreError::Validation("Collection name is required".into()));
    }
    if len > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Collection name exceeds maximum length of {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_description(description: Option<&str>) -> Result<(), CoreError> {
    if description.is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_LENGTH) {
        return Err(CoreError::Validation(format!(
            "Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}
