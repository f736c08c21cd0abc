use crate::types::DbId;

/// Domain error taxonomy shared by every layer.
///
/// Each variant maps to exactly one HTTP status and machine-readable code in
/// the API crate, so clients can branch on the kind rather than the message.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// No token, a malformed header, or a token that fails verification.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// The token verifies but its session was revoked (logout, remote
    /// termination, or "terminate all other sessions").
    #[error("Session has been terminated")]
    SessionTerminated,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Login failure. Identical for unknown identifiers and wrong passwords.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Re-authentication failure for an already-authenticated caller.
    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("A user with this email is already registered")]
    AlreadyRegistered,

    #[error("Already following this user")]
    AlreadyFollowing,

    #[error("Not following this user")]
    NotFollowing,

    #[error("Cannot terminate the current session, use logout instead")]
    CannotTerminateCurrent,

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
