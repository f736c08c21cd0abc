//! Ownership, visibility, and follow-graph authorization predicates.
//!
//! Every handler that reads or mutates a user-owned resource calls one of
//! these instead of comparing ids inline, so the rules live in one place:
//!
//! - Mutations and deletions require the actor to own the resource.
//! - A collection may be read by its owner, or by anyone when it is public.
//! - A user may not follow themselves.

use crate::error::CoreError;
use crate::types::DbId;

/// Require that `actor_id` owns the resource.
///
/// `entity` names the resource in the error message (e.g. `"collection"`).
pub fn ensure_owner(owner_id: DbId, actor_id: DbId, entity: &str) -> Result<(), CoreError> {
    if owner_id != actor_id {
        return Err(CoreError::Forbidden(format!(
            "You do not have permission to modify this {entity}"
        )));
    }
    Ok(())
}

/// Whether a (possibly anonymous) viewer may read a resource.
pub fn can_view(owner_id: DbId, is_public: bool, viewer_id: Option<DbId>) -> bool {
    is_public || viewer_id == Some(owner_id)
}

/// Require read access under the visibility rule (see [`can_view`]).
pub fn ensure_can_view(
    owner_id: DbId,
    is_public: bool,
    viewer_id: Option<DbId>,
    entity: &str,
) -> Result<(), CoreError> {
    if !can_view(owner_id, is_public, viewer_id) {
        return Err(CoreError::Forbidden(format!("This {entity} is private")));
    }
    Ok(())
}

/// Require that a message is visible to `actor_id` (sender or recipient).
pub fn ensure_participant(
    sender_id: DbId,
    recipient_id: DbId,
    actor_id: DbId,
) -> Result<(), CoreError> {
    if actor_id != sender_id && actor_id != recipient_id {
        return Err(CoreError::Forbidden(
            "You are not a participant in this conversation".into(),
        ));
    }
    Ok(())
}

/// Reject self-follow edges.
pub fn ensure_can_follow(follower_id: DbId, following_id: DbId) -> Result<(), CoreError> {
    if follower_id == following_id {
        return Err(CoreError::InvalidOperation(
            "You cannot follow yourself".into(),
        ));
    }
    Ok(())
}

/// Reject sending a direct message to oneself.
pub fn ensure_distinct_recipient(sender_id: DbId, recipient_id: DbId) -> Result<(), CoreError> {
    if sender_id == recipient_id {
        return Err(CoreError::InvalidOperation(
            "You cannot send a message to yourself".into(),
        ));
    }
    Ok(())
}
