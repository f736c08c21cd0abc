//! Repository for the `user_sessions` table.
//!
//! Sessions are looked up by the SHA-256 hash of their bearer token. Rows are
//! never deleted; every "revoke" operation flips `is_active` to `false`.

use numisroma_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{CreateSession, UserSession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, token_hash, device_type, os, browser, device_name, \
                       ip_address, location, is_active, last_activity, created_at";

/// Provides CRUD operations for user sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new active session, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions
                (user_id, token_hash, device_type, os, browser, device_name, ip_address, location)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(input.user_id)
            .bind(&input.token_hash)
            .bind(input.device.device_type.as_str())
            .bind(&input.device.os)
            .bind(&input.device.browser)
            .bind(&input.device.device_name)
            .bind(&input.ip_address)
            .bind(&input.location)
            .fetch_one(pool)
            .await
    }

    /// Find the active session for a token hash.
    pub async fn find_active_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE token_hash = $1 AND is_active = true"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Find a session by token hash regardless of its state.
    pub async fn find_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_sessions WHERE token_hash = $1");
        sqlx::query_as::<_, UserSession>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Find an active session by id, scoped to its owner.
    pub async fn find_active_for_owner(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE id = $1 AND user_id = $2 AND is_active = true"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's active sessions, most recently active first.
    pub async fn list_active_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE user_id = $1 AND is_active = true
             ORDER BY last_activity DESC, id DESC"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Set `last_activity` to now.
    pub async fn touch_activity(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE user_sessions SET last_activity = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Deactivate a single session. Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_active = false WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deactivate every active session of `user_id` except the one whose
    /// token hash is `except_token_hash`. Returns the count deactivated.
    pub async fn deactivate_all_except(
        pool: &PgPool,
        user_id: DbId,
        except_token_hash: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_active = false
             WHERE user_id = $1 AND is_active = true AND token_hash <> $2",
        )
        .bind(user_id)
        .bind(except_token_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Deactivate all active sessions for a user. Returns the count deactivated.
    pub async fn deactivate_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_active = false
             WHERE user_id = $1 AND is_active = true",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
