//! User session model and DTOs.

use numisroma_core::device::{DeviceInfo, DeviceType};
use numisroma_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A session row from the `user_sessions` table.
///
/// The bearer token itself is never stored, only its SHA-256 hex digest.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub device_type: String,
    pub os: String,
    pub browser: String,
    pub device_name: String,
    pub ip_address: String,
    pub location: String,
    pub is_active: bool,
    pub last_activity: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for creating a new session.
pub struct CreateSession {
    pub user_id: DbId,
    pub token_hash: String,
    pub device: DeviceInfo,
    pub ip_address: String,
    pub location: String,
}

/// Session as listed to its owner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: DbId,
    pub device_type: DeviceType,
    pub os: String,
    pub browser: String,
    pub device_name: String,
    pub ip_address: String,
    pub location: String,
    pub last_activity: Timestamp,
    pub created_at: Timestamp,
    /// Whether this is the session the listing request was made with.
    pub is_current_session: bool,
}

impl UserSession {
    /// Build the owner-facing view, flagging it when `current_token_hash`
    /// is this session's token.
    pub fn to_response(&self, current_token_hash: &str) -> SessionResponse {
        SessionResponse {
            id: self.id,
            device_type: DeviceType::parse(&self.device_type),
            os: self.os.clone(),
            browser: self.browser.clone(),
            device_name: self.device_name.clone(),
            ip_address: self.ip_address.clone(),
            location: self.location.clone(),
            last_activity: self.last_activity,
            created_at: self.created_at,
            is_current_session: self.token_hash == current_token_hash,
        }
    }
}
