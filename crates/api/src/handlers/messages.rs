//! Direct messages between users.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use numisroma_core::authz::{ensure_distinct_recipient, ensure_owner, ensure_participant};
use numisroma_core::error::CoreError;
use numisroma_core::types::DbId;
use numisroma_db::models::message::{CreateMessage, Message};
use numisroma_db::repositories::MessageRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::users::find_user;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum length of a message body in characters.
const MAX_BODY_LENGTH: usize = 2_000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub recipient_id: DbId,
    pub body: String,
}

/// POST /api/messages
pub async fn send_message(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SendMessageRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_distinct_recipient(auth_user.user_id, input.recipient_id)?;

    let body = input.body.trim();
    if body.is_empty() {
        return Err(CoreError::Validation("Message body is required".into()).into());
    }
    if body.chars().count() > MAX_BODY_LENGTH {
        return Err(CoreError::Validation(format!(
            "Message exceeds maximum length of {MAX_BODY_LENGTH} characters"
        ))
        .into());
    }

    find_user(&state, input.recipient_id).await?;

    let message = MessageRepo::create(
        &state.pool,
        &CreateMessage {
            sender_id: auth_user.user_id,
            recipient_id: input.recipient_id,
            body: body.to_string(),
        },
    )
    .await?;

    tracing::info!(
        message_id = message.id,
        sender_id = message.sender_id,
        recipient_id = message.recipient_id,
        "Message sent",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

/// GET /api/messages/conversations/{user_id}
///
/// Both directions of the thread with `user_id`, oldest first.
pub async fn get_conversation(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let messages = MessageRepo::list_conversation(&state.pool, auth_user.user_id, user_id).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// GET /api/messages/{id}
pub async fn get_message(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(message_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let message = find_message(&state, message_id).await?;
    ensure_participant(message.sender_id, message.recipient_id, auth_user.user_id)?;
    Ok(Json(DataResponse { data: message }))
}

/// POST /api/messages/{id}/read
///
/// Only the recipient may mark a message as read.
pub async fn mark_read(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(message_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let message = find_message(&state, message_id).await?;
    ensure_owner(message.recipient_id, auth_user.user_id, "message")?;

    let message = MessageRepo::mark_read(&state.pool, message_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Message",
            id: message_id,
        })?;

    Ok(Json(DataResponse { data: message }))
}

/// DELETE /api/messages/{id}
///
/// Only the sender may delete a message.
pub async fn delete_message(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(message_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let message = find_message(&state, message_id).await?;
    ensure_owner(message.sender_id, auth_user.user_id, "message")?;

    MessageRepo::delete(&state.pool, message_id).await?;

    tracing::info!(message_id, sender_id = auth_user.user_id, "Message deleted");

    Ok(StatusCode::NO_CONTENT)
}

async fn find_message(state: &AppState, message_id: DbId) -> AppResult<Message> {
    MessageRepo::find_by_id(&state.pool, message_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Message",
            id: message_id,
        }))
}
