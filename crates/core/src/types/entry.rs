//! Wishlist entry types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::id::EntryId;

/// A validated request to add a product to a customer's wishlist.
///
/// Produced by [`WishlistRequest::validate`](super::WishlistRequest::validate),
/// which guarantees both natural-key fields are non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWishlistEntry {
    customer_id: String,
    product_id: String,
    tags_category: Option<String>,
}

impl NewWishlistEntry {
    pub(crate) const fn new(
        customer_id: String,
        product_id: String,
        tags_category: Option<String>,
    ) -> Self {
        Self {
            customer_id,
            product_id,
            tags_category,
        }
    }

    /// Owning customer.
    #[must_use]
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// Wished-for product.
    #[must_use]
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Free-text category label used by tag search.
    #[must_use]
    pub fn tags_category(&self) -> Option<&str> {
        self.tags_category.as_deref()
    }

    /// Identifier the entry will be stored under.
    #[must_use]
    pub fn id(&self) -> EntryId {
        EntryId::derive(&self.customer_id, &self.product_id)
    }

    /// Build the entry to persist, stamped with `created_at`.
    #[must_use]
    pub fn into_entry(self, created_at: DateTime<Utc>) -> WishlistEntry {
        WishlistEntry {
            id: EntryId::derive(&self.customer_id, &self.product_id),
            customer_id: self.customer_id,
            product_id: self.product_id,
            tags_category: self.tags_category,
            created_at,
        }
    }
}

/// One customer's interest in one product.
///
/// The `id` is always `EntryId::derive(customer_id, product_id)`; fields are
/// private so the two cannot drift apart. Entries are never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    id: EntryId,
    customer_id: String,
    product_id: String,
    tags_category: Option<String>,
    created_at: DateTime<Utc>,
}

impl WishlistEntry {
    /// Rebuild an entry from columns read back from a store.
    ///
    /// The identifier is re-derived rather than trusted.
    #[must_use]
    pub fn from_stored(
        customer_id: String,
        product_id: String,
        tags_category: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EntryId::derive(&customer_id, &product_id),
            customer_id,
            product_id,
            tags_category,
            created_at,
        }
    }

    /// Composite identifier.
    #[must_use]
    pub const fn id(&self) -> &EntryId {
        &self.id
    }

    /// Owning customer.
    #[must_use]
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// Wished-for product.
    #[must_use]
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Free-text category label used by tag search.
    #[must_use]
    pub fn tags_category(&self) -> Option<&str> {
        self.tags_category.as_deref()
    }

    /// When the entry was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn new_entry(customer: &str, product: &str, tag: Option<&str>) -> NewWishlistEntry {
        NewWishlistEntry::new(customer.to_owned(), product.to_owned(), tag.map(String::from))
    }

    #[test]
    fn test_into_entry_derives_id() {
        let entry = new_entry("u1", "p1", Some("kitchen")).into_entry(Utc::now());
        assert_eq!(entry.id().as_str(), "customer#u1-product#p1");
        assert_eq!(entry.customer_id(), "u1");
        assert_eq!(entry.product_id(), "p1");
        assert_eq!(entry.tags_category(), Some("kitchen"));
    }

    #[test]
    fn test_new_entry_id_matches_built_entry() {
        let new = new_entry("u1", "p1", None);
        let id = new.id();
        assert_eq!(&id, new.into_entry(Utc::now()).id());
    }

    #[test]
    fn test_from_stored_rederives_id() {
        let entry = WishlistEntry::from_stored("c".into(), "p".into(), None, Utc::now());
        assert_eq!(entry.id(), &EntryId::derive("c", "p"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let entry = new_entry("u1", "p1", Some("")).into_entry(Utc::now());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], "customer#u1-product#p1");
        assert_eq!(json["customerId"], "u1");
        assert_eq!(json["productId"], "p1");
        assert_eq!(json["tagsCategory"], "");
        assert!(json.get("createdAt").is_some());
    }
}
