//! Persistence boundary for wishlist entries.
//!
//! [`WishlistRules`](crate::WishlistRules) performs every durable read and
//! write through [`WishlistStore`]. Implementations own durability, isolation
//! and timeouts; the rules engine holds no state between calls.
//!
//! # Implementations
//!
//! - [`MemoryStore`] - process-local, insertion ordered
//! - `PgWishlistStore` (server crate) - `PostgreSQL`

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{EntryId, TagPattern, WishlistEntry};

pub use memory::MemoryStore;

/// Boxed error from a store backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors reported by a [`WishlistStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// An entry with this identifier already exists.
    #[error("duplicate key: {0}")]
    DuplicateKey(EntryId),

    /// Connectivity, timeout, decoding or any other backend failure.
    #[error("store backend error: {0}")]
    Backend(#[source] BoxError),
}

impl StoreError {
    /// Wrap any backend error.
    pub fn backend(err: impl Into<BoxError>) -> Self {
        Self::Backend(err.into())
    }
}

/// Durable storage for wishlist entries.
///
/// Entry identifiers are unique; `insert` must fail with
/// [`StoreError::DuplicateKey`] rather than overwrite. Sequences are returned
/// in the store's default order (oldest first).
#[async_trait]
pub trait WishlistStore: Send + Sync {
    /// Insert a new entry.
    async fn insert(&self, entry: WishlistEntry) -> Result<WishlistEntry, StoreError>;

    /// Delete an entry. Deleting a missing id is not an error.
    async fn delete_by_id(&self, id: &EntryId) -> Result<(), StoreError>;

    /// Whether an entry with this id exists.
    async fn exists_by_id(&self, id: &EntryId) -> Result<bool, StoreError>;

    /// Number of entries owned by a customer.
    async fn count_by_customer_id(&self, customer_id: &str) -> Result<u64, StoreError>;

    /// All entries owned by a customer.
    async fn find_by_customer_id(&self, customer_id: &str)
    -> Result<Vec<WishlistEntry>, StoreError>;

    /// Whether a customer owns any entry.
    async fn exists_by_customer_id(&self, customer_id: &str) -> Result<bool, StoreError>;

    /// Whether an entry exists for the `(customer_id, product_id)` pair.
    async fn exists_by_customer_and_product(
        &self,
        customer_id: &str,
        product_id: &str,
    ) -> Result<bool, StoreError>;

    /// All entries whose tag matches the pattern.
    async fn find_by_pattern(&self, pattern: &TagPattern)
    -> Result<Vec<WishlistEntry>, StoreError>;

    /// Whether any entry's tag matches the pattern.
    async fn exists_by_pattern(&self, pattern: &TagPattern) -> Result<bool, StoreError>;

    /// Cheap connectivity probe used by readiness checks.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
