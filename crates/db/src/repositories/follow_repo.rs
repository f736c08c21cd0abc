//! Repository for the `follows` table.

use numisroma_core::types::DbId;
use sqlx::PgPool;

use crate::models::follow::{Follow, FollowUser};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, follower_id, following_id, created_at";

/// Provides operations on the directed follow graph.
pub struct FollowRepo;

impl FollowRepo {
    /// Insert a follow edge.
    ///
    /// Returns `None` when the edge already exists (the unique pair
    /// constraint absorbs concurrent duplicates).
    pub async fn create(
        pool: &PgPool,
        follower_id: DbId,
        following_id: DbId,
    ) -> Result<Option<Follow>, sqlx::Error> {
        let query = format!(
            "INSERT INTO follows (follower_id, following_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_follows_pair DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Follow>(&query)
            .bind(follower_id)
            .bind(following_id)
            .fetch_optional(pool)
            .await
    }

    /// Remove a follow edge. Returns `true` if an edge was removed.
    pub async fn delete(
        pool: &PgPool,
        follower_id: DbId,
        following_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND following_id = $2")
                .bind(follower_id)
                .bind(following_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether `follower_id` follows `following_id`.
    pub async fn exists(
        pool: &PgPool,
        follower_id: DbId,
        following_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND following_id = $2)",
        )
        .bind(follower_id)
        .bind(following_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Users following `user_id`, newest edge first.
    pub async fn list_followers(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<FollowUser>, sqlx::Error> {
        sqlx::query_as::<_, FollowUser>(
            "SELECT u.id, u.username, u.avatar_url, f.created_at AS followed_at
             FROM follows f
             JOIN users u ON u.id = f.follower_id
             WHERE f.following_id = $1
             ORDER BY f.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Users that `user_id` follows, newest edge first.
    pub async fn list_following(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<FollowUser>, sqlx::Error> {
        sqlx::query_as::<_, FollowUser>(
            "SELECT u.id, u.username, u.avatar_url, f.created_at AS followed_at
             FROM follows f
             JOIN users u ON u.id = f.following_id
             WHERE f.follower_id = $1
             ORDER BY f.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// `(followers, following)` counts for a user.
    pub async fn counts(pool: &PgPool, user_id: DbId) -> Result<(i64, i64), sqlx::Error> {
        sqlx::query_as(
            "SELECT
                (SELECT COUNT(*) FROM follows WHERE following_id = $1),
                (SELECT COUNT(*) FROM follows WHERE follower_id = $1)",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Remove every edge touching `user_id` on either side. Returns the count.
    pub async fn delete_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM follows WHERE follower_id = $1 OR following_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
