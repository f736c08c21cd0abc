//! Session registry: the server-side record that makes bearer tokens
//! revocable.
//!
//! A token is only honoured while a session row with its hash is active.
//! Rows are never deleted here; revocation flips `is_active`.

use numisroma_core::device::DeviceInfo;
use numisroma_core::error::CoreError;
use numisroma_core::types::DbId;
use numisroma_db::models::session::{CreateSession, SessionResponse, UserSession};
use numisroma_db::repositories::SessionRepo;
use sqlx::PgPool;

use crate::auth::jwt::hash_token;
use crate::error::AppResult;
use crate::middleware::client::ClientContext;

/// Record a freshly issued token as an active session for `user_id`.
pub async fn create_session(
    pool: &PgPool,
    user_id: DbId,
    token: &str,
    client: &ClientContext,
) -> Result<UserSession, sqlx::Error> {
    let input = CreateSession {
        user_id,
        token_hash: hash_token(token),
        device: DeviceInfo::from_user_agent(client.user_agent.as_deref()),
        ip_address: client.ip_address.clone(),
        location: client.location.clone(),
    };
    let session = SessionRepo::create(pool, &input).await?;

    tracing::info!(
        user_id,
        session_id = session.id,
        device = %session.device_name,
        ip = %session.ip_address,
        "Session created",
    );
    Ok(session)
}

pub async fn find_active_by_token(
    pool: &PgPool,
    token: &str,
) -> Result<Option<UserSession>, sqlx::Error> {
    SessionRepo::find_active_by_token_hash(pool, &hash_token(token)).await
}

/// Bump `last_activity`. Failures are logged and swallowed; this is the only
/// registry operation whose errors never reach the caller.
pub async fn touch_activity(pool: &PgPool, session: &UserSession) {
    if let Err(error) = SessionRepo::touch_activity(pool, session.id).await {
        tracing::warn!(
            session_id = session.id,
            user_id = session.user_id,
            %error,
            "Failed to update session activity",
        );
    }
}

/// Active sessions of `user_id`, most recently active first, with the one
/// belonging to `current_token` flagged.
pub async fn list_active(
    pool: &PgPool,
    user_id: DbId,
    current_token: &str,
) -> Result<Vec<SessionResponse>, sqlx::Error> {
    let current_hash = hash_token(current_token);
    let sessions = SessionRepo::list_active_for_user(pool, user_id).await?;
    Ok(sessions
        .iter()
        .map(|s| s.to_response(&current_hash))
        .collect())
}

/// Revoke one of the caller's other sessions.
pub async fn terminate(
    pool: &PgPool,
    session_id: DbId,
    user_id: DbId,
    current_token: &str,
) -> AppResult<()> {
    let target = SessionRepo::find_active_for_owner(pool, session_id, user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Session",
            id: session_id,
        })?;

    if target.token_hash == hash_token(current_token) {
        return Err(CoreError::CannotTerminateCurrent.into());
    }

    SessionRepo::deactivate(pool, target.id).await?;
    tracing::info!(user_id, session_id, "Session terminated");
    Ok(())
}

/// Revoke every active session of `user_id` except the one for
/// `except_token`. Returns how many were revoked.
pub async fn terminate_all_others(
    pool: &PgPool,
    user_id: DbId,
    except_token: &str,
) -> Result<u64, sqlx::Error> {
    let count = SessionRepo::deactivate_all_except(pool, user_id, &hash_token(except_token)).await?;
    tracing::info!(user_id, count, "Other sessions terminated");
    Ok(count)
}

/// Logout: revoke the session that `token` belongs to.
pub async fn deactivate(pool: &PgPool, token: &str) -> Result<bool, sqlx::Error> {
    let Some(session) = SessionRepo::find_by_token_hash(pool, &hash_token(token)).await? else {
        return Ok(false);
    };
    let revoked = SessionRepo::deactivate(pool, session.id).await?;
    if revoked {
        tracing::info!(user_id = session.user_id, session_id = session.id, "Logged out");
    }
    Ok(revoked)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use chrono::Utc;
    use sqlx::postgres::PgPoolOptions;

    use super::*;

    fn session() -> UserSession {
        UserSession {
            id: 7,
            user_id: 3,
            token_hash: hash_token("token"),
            device_type: "desktop".into(),
            os: "Linux".into(),
            browser: "Firefox".into(),
            device_name: "Linux • Firefox".into(),
            ip_address: "127.0.0.1".into(),
            location: "Unknown".into(),
            is_active: true,
            last_activity: Utc::now(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn touch_activity_swallows_database_failure() {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy("postgres://nobody@127.0.0.1:1/none")
            .expect("lazy pool should build");

        let started = Instant::now();
        touch_activity(&pool, &session()).await;

        // Returned normally after the failed acquire instead of panicking or hanging.
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
