//! In-memory wishlist store.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::{StoreError, WishlistStore};
use crate::types::{EntryId, TagPattern, WishlistEntry};

/// Process-local [`WishlistStore`] backed by an insertion-ordered vector.
///
/// Used by tests and by the server when no database is configured. Each call
/// takes the lock once, so individual operations are atomic, but nothing
/// spans two calls.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<Vec<WishlistEntry>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the lock is poisoned.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    /// Whether the store holds no entries.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<WishlistEntry>>, StoreError> {
        self.entries
            .read()
            .map_err(|_| StoreError::backend("wishlist store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<WishlistEntry>>, StoreError> {
        self.entries
            .write()
            .map_err(|_| StoreError::backend("wishlist store lock poisoned"))
    }

    fn tag_matches(
        entries: &[WishlistEntry],
        pattern: &TagPattern,
    ) -> Result<Vec<WishlistEntry>, StoreError> {
        let re = pattern.compile().map_err(StoreError::backend)?;
        Ok(entries
            .iter()
            .filter(|e| e.tags_category().is_some_and(|tag| re.is_match(tag)))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl WishlistStore for MemoryStore {
    async fn insert(&self, entry: WishlistEntry) -> Result<WishlistEntry, StoreError> {
        let mut entries = self.write()?;
        if entries.iter().any(|e| e.id() == entry.id()) {
            return Err(StoreError::DuplicateKey(entry.id().clone()));
        }
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn delete_by_id(&self, id: &EntryId) -> Result<(), StoreError> {
        self.write()?.retain(|e| e.id() != id);
        Ok(())
    }

    async fn exists_by_id(&self, id: &EntryId) -> Result<bool, StoreError> {
        Ok(self.read()?.iter().any(|e| e.id() == id))
    }

    async fn count_by_customer_id(&self, customer_id: &str) -> Result<u64, StoreError> {
        let count = self
            .read()?
            .iter()
            .filter(|e| e.customer_id() == customer_id)
            .count();
        Ok(count as u64)
    }

    async fn find_by_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Vec<WishlistEntry>, StoreError> {
        Ok(self
            .read()?
            .iter()
            .filter(|e| e.customer_id() == customer_id)
            .cloned()
            .collect())
    }

    async fn exists_by_customer_id(&self, customer_id: &str) -> Result<bool, StoreError> {
        Ok(self.read()?.iter().any(|e| e.customer_id() == customer_id))
    }

    async fn exists_by_customer_and_product(
        &self,
        customer_id: &str,
        product_id: &str,
    ) -> Result<bool, StoreError> {
        Ok(self
            .read()?
            .iter()
            .any(|e| e.customer_id() == customer_id && e.product_id() == product_id))
    }

    async fn find_by_pattern(
        &self,
        pattern: &TagPattern,
    ) -> Result<Vec<WishlistEntry>, StoreError> {
        Self::tag_matches(&self.read()?, pattern)
    }

    async fn exists_by_pattern(&self, pattern: &TagPattern) -> Result<bool, StoreError> {
        Ok(!Self::tag_matches(&self.read()?, pattern)?.is_empty())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn entry(customer: &str, product: &str, tag: Option<&str>) -> WishlistEntry {
        WishlistEntry::from_stored(
            customer.to_owned(),
            product.to_owned(),
            tag.map(String::from),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id() {
        let store = MemoryStore::new();
        store.insert(entry("u1", "p1", None)).await.unwrap();

        let err = store.insert(entry("u1", "p1", Some("other"))).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(id) if id.as_str() == "customer#u1-product#p1"));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_customer_queries_keep_insertion_order() {
        let store = MemoryStore::new();
        store.insert(entry("u1", "p2", None)).await.unwrap();
        store.insert(entry("u2", "p1", None)).await.unwrap();
        store.insert(entry("u1", "p1", None)).await.unwrap();

        assert_eq!(store.count_by_customer_id("u1").await.unwrap(), 2);
        let products: Vec<_> = store
            .find_by_customer_id("u1")
            .await
            .unwrap()
            .iter()
            .map(|e| e.product_id().to_owned())
            .collect();
        assert_eq!(products, ["p2", "p1"]);
        assert!(store.exists_by_customer_id("u2").await.unwrap());
        assert!(!store.exists_by_customer_id("u3").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let store = MemoryStore::new();
        let stored = store.insert(entry("u1", "p1", None)).await.unwrap();
        assert!(store.exists_by_id(stored.id()).await.unwrap());

        store.delete_by_id(stored.id()).await.unwrap();
        assert!(!store.exists_by_id(stored.id()).await.unwrap());
        assert!(store.is_empty().unwrap());

        // Deleting again is a no-op at the store level
        store.delete_by_id(stored.id()).await.unwrap();
    }

    #[tokio::test]
    async fn test_exists_by_customer_and_product() {
        let store = MemoryStore::new();
        store.insert(entry("u1", "p1", None)).await.unwrap();

        assert!(store.exists_by_customer_and_product("u1", "p1").await.unwrap());
        assert!(!store.exists_by_customer_and_product("u1", "p2").await.unwrap());
        assert!(!store.exists_by_customer_and_product("u2", "p1").await.unwrap());
    }

    #[tokio::test]
    async fn test_pattern_skips_untagged_entries() {
        let store = MemoryStore::new();
        store.insert(entry("u1", "p1", None)).await.unwrap();
        store.insert(entry("u1", "p2", Some("Home Electronics"))).await.unwrap();

        let pattern = TagPattern::contains("");
        let found = store.find_by_pattern(&pattern).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].product_id(), "p2");

        assert!(store.exists_by_pattern(&TagPattern::contains("ELECTRONICS")).await.unwrap());
        assert!(!store.exists_by_pattern(&TagPattern::contains("garden")).await.unwrap());
    }
}
