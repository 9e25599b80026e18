//! `PostgreSQL` implementation of the wishlist store.
//!
//! Queries are built at runtime with `sqlx::query_as` so the crate builds
//! without a live database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use wishlist_core::{EntryId, StoreError, TagPattern, WishlistEntry, WishlistStore};

/// Row shape of `wishlist.entry`.
#[derive(Debug, sqlx::FromRow)]
struct EntryRow {
    customer_id: String,
    product_id: String,
    tags_category: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<EntryRow> for WishlistEntry {
    fn from(row: EntryRow) -> Self {
        Self::from_stored(row.customer_id, row.product_id, row.tags_category, row.created_at)
    }
}

/// Wishlist store backed by the `wishlist.entry` table.
#[derive(Debug, Clone)]
pub struct PgWishlistStore {
    pool: PgPool,
}

impl PgWishlistStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl WishlistStore for PgWishlistStore {
    async fn insert(&self, entry: WishlistEntry) -> Result<WishlistEntry, StoreError> {
        let row = sqlx::query_as::<_, EntryRow>(
            r"
            INSERT INTO wishlist.entry (id, customer_id, product_id, tags_category, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING customer_id, product_id, tags_category, created_at
            ",
        )
        .bind(entry.id())
        .bind(entry.customer_id())
        .bind(entry.product_id())
        .bind(entry.tags_category())
        .bind(entry.created_at())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return StoreError::DuplicateKey(entry.id().clone());
            }
            StoreError::backend(e)
        })?;

        Ok(row.into())
    }

    async fn delete_by_id(&self, id: &EntryId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM wishlist.entry WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::backend)?;
        Ok(())
    }

    async fn exists_by_id(&self, id: &EntryId) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM wishlist.entry WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::backend)
    }

    async fn count_by_customer_id(&self, customer_id: &str) -> Result<u64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM wishlist.entry WHERE customer_id = $1",
        )
        .bind(customer_id)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        u64::try_from(count).map_err(StoreError::backend)
    }

    async fn find_by_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Vec<WishlistEntry>, StoreError> {
        let rows = sqlx::query_as::<_, EntryRow>(
            r"
            SELECT customer_id, product_id, tags_category, created_at
            FROM wishlist.entry
            WHERE customer_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn exists_by_customer_id(&self, customer_id: &str) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM wishlist.entry WHERE customer_id = $1)",
        )
        .bind(customer_id)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::backend)
    }

    async fn exists_by_customer_and_product(
        &self,
        customer_id: &str,
        product_id: &str,
    ) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT 1 FROM wishlist.entry
                WHERE customer_id = $1 AND product_id = $2
            )
            ",
        )
        .bind(customer_id)
        .bind(product_id)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::backend)
    }

    async fn find_by_pattern(
        &self,
        pattern: &TagPattern,
    ) -> Result<Vec<WishlistEntry>, StoreError> {
        // `~*` is PostgreSQL's case-insensitive regex match; NULL tags never match
        let rows = sqlx::query_as::<_, EntryRow>(
            r"
            SELECT customer_id, product_id, tags_category, created_at
            FROM wishlist.entry
            WHERE tags_category ~* $1
            ORDER BY created_at, id
            ",
        )
        .bind(pattern.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn exists_by_pattern(&self, pattern: &TagPattern) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM wishlist.entry WHERE tags_category ~* $1)",
        )
        .bind(pattern.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::backend)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(StoreError::backend)?;
        Ok(())
    }
}
