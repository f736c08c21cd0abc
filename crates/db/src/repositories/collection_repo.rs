//! Repository for the `collections` table.

use numisroma_core::types::DbId;
use sqlx::PgPool;

use crate::models::collection::{Collection, CreateCollection, UpdateCollection};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, description, is_public, created_at, updated_at";

/// Provides CRUD operations for collections.
pub struct CollectionRepo;

impl CollectionRepo {
    /// Insert a new collection owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateCollection,
    ) -> Result<Collection, sqlx::Error> {
        let query = format!(
            "INSERT INTO collections (user_id, name, description, is_public)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.is_public)
            .fetch_one(pool)
            .await
    }

    /// Find a collection by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Collection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM collections WHERE id = $1");
        sqlx::query_as::<_, Collection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's collections, newest first. Private ones are included
    /// only when `include_private` is set.
    pub async fn list_by_owner(
        pool: &PgPool,
        user_id: DbId,
        include_private: bool,
    ) -> Result<Vec<Collection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collections
             WHERE user_id = $1 AND ($2 OR is_public)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(user_id)
            .bind(include_private)
            .fetch_all(pool)
            .await
    }

    /// Update a collection. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCollection,
    ) -> Result<Option<Collection>, sqlx::Error> {
        let query = format!(
            "UPDATE collections SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                is_public = COALESCE($4, is_public)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.is_public)
            .fetch_optional(pool)
            .await
    }

    /// Delete a collection. Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM collections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every collection owned by `user_id`. Returns the count.
    pub async fn delete_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM collections WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Number of collections owned by `user_id`, with the same visibility
    /// rule as [`Self::list_by_owner`].
    pub async fn count_for_user(
        pool: &PgPool,
        user_id: DbId,
        include_private: bool,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM collections WHERE user_id = $1 AND ($2 OR is_public)",
        )
        .bind(user_id)
        .bind(include_private)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
