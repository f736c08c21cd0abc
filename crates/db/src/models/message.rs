//! Direct message model.

use numisroma_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: DbId,
    pub sender_id: DbId,
    pub recipient_id: DbId,
    pub body: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// DTO for sending a message.
pub struct CreateMessage {
    pub sender_id: DbId,
    pub recipient_id: DbId,
    pub body: String,
}
