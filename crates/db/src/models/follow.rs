//! Follow-graph model.

use numisroma_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A directed edge from the `follows` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    pub id: DbId,
    pub follower_id: DbId,
    pub following_id: DbId,
    pub created_at: Timestamp,
}

/// The user at the other end of an edge, for follower/following lists.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUser {
    pub id: DbId,
    pub username: String,
    pub avatar_url: Option<String>,
    pub followed_at: Timestamp,
}
