//! Business rules for wishlist operations.
//!
//! [`WishlistRules`] sits between the transport layer and a [`WishlistStore`].
//! It enforces the per-customer quota, derives entry identifiers, gates
//! deletes and lookups on existence, and builds escaped tag patterns.
//!
//! # Concurrency
//!
//! The rules engine is stateless; every guarantee comes from the store. Two
//! sequences are check-then-act across separate store calls and are not
//! atomic:
//!
//! - `create`: count, then insert. Concurrent creates for one customer near the
//!   quota can both pass the count and overshoot [`MAX_ENTRIES_PER_CUSTOMER`]
//!   by a small margin. Duplicates are still impossible because the insert
//!   collides on the derived id.
//! - `delete`: exists, then delete. The loser of two racing deletes of the
//!   same entry sees [`WishlistError::EntryNotFound`].
//!
//! Failures are returned, never retried or logged here.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use crate::store::{StoreError, WishlistStore};
use crate::types::{EntryId, NewWishlistEntry, TagPattern, WishlistEntry};

/// Maximum number of entries a single customer may hold.
pub const MAX_ENTRIES_PER_CUSTOMER: u64 = 20;

/// What a failed lookup was looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Missing {
    /// A single entry, by composite id.
    Entry(EntryId),
    /// Any entry owned by the customer.
    Customer(String),
    /// Any entry whose tag contains the text.
    Tag(String),
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry(id) => write!(f, "Wishlist with id {id} does not exist."),
            Self::Customer(customer_id) => {
                write!(f, "No wishlists found for customer with id {customer_id}")
            }
            Self::Tag(tag) => write!(f, "No wishlists found with tag category: {tag}"),
        }
    }
}

/// Outcomes of a wishlist operation other than success.
#[derive(Debug, Error)]
pub enum WishlistError {
    /// The customer already holds the maximum number of entries.
    #[error("Customer has reached the maximum number of wishlists ({limit}).")]
    QuotaExceeded {
        /// Customer that hit the quota.
        customer_id: String,
        /// The quota in force.
        limit: u64,
    },

    /// An entry for this `(customer, product)` pair already exists.
    #[error("Wishlist with id {0} already exists.")]
    DuplicateEntry(EntryId),

    /// Nothing matched the lookup.
    #[error("{0}")]
    EntryNotFound(Missing),

    /// The store failed; passed through unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for rule operations.
pub type Result<T> = std::result::Result<T, WishlistError>;

/// Business-rule engine over an injected [`WishlistStore`].
///
/// Cheap to clone; holds only the store handle.
#[derive(Clone)]
pub struct WishlistRules {
    store: Arc<dyn WishlistStore>,
}

impl fmt::Debug for WishlistRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WishlistRules").finish_non_exhaustive()
    }
}

impl WishlistRules {
    /// Create a rules engine over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn WishlistStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn WishlistStore> {
        &self.store
    }

    /// Add an entry to a customer's wishlist.
    ///
    /// # Errors
    ///
    /// - `QuotaExceeded` if the customer already holds
    ///   [`MAX_ENTRIES_PER_CUSTOMER`] entries; no insert is attempted.
    /// - `DuplicateEntry` if the store reports a key collision.
    /// - `Store` for any other store failure.
    pub async fn create(&self, entry: NewWishlistEntry) -> Result<WishlistEntry> {
        let count = self.store.count_by_customer_id(entry.customer_id()).await?;
        if count >= MAX_ENTRIES_PER_CUSTOMER {
            return Err(WishlistError::QuotaExceeded {
                customer_id: entry.customer_id().to_owned(),
                limit: MAX_ENTRIES_PER_CUSTOMER,
            });
        }

        match self.store.insert(entry.into_entry(Utc::now())).await {
            Ok(stored) => Ok(stored),
            Err(StoreError::DuplicateKey(id)) => Err(WishlistError::DuplicateEntry(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove the entry for `(customer_id, product_id)`.
    ///
    /// # Errors
    ///
    /// - `EntryNotFound` if no such entry exists.
    /// - `Store` for any store failure.
    pub async fn delete(&self, customer_id: &str, product_id: &str) -> Result<()> {
        let id = EntryId::derive(customer_id, product_id);
        if !self.store.exists_by_id(&id).await? {
            return Err(WishlistError::EntryNotFound(Missing::Entry(id)));
        }
        self.store.delete_by_id(&id).await?;
        Ok(())
    }

    /// All entries owned by `customer_id`, in store order.
    ///
    /// An empty wishlist is reported as `EntryNotFound`, not an empty list.
    ///
    /// # Errors
    ///
    /// - `EntryNotFound` if the customer has no entries.
    /// - `Store` for any store failure.
    pub async fn list_by_customer(&self, customer_id: &str) -> Result<Vec<WishlistEntry>> {
        if !self.store.exists_by_customer_id(customer_id).await? {
            return Err(WishlistError::EntryNotFound(Missing::Customer(
                customer_id.to_owned(),
            )));
        }
        Ok(self.store.find_by_customer_id(customer_id).await?)
    }

    /// All entries whose tag contains `raw_tag`, ignoring case.
    ///
    /// `raw_tag` is matched literally; regex metacharacters are escaped.
    ///
    /// # Errors
    ///
    /// - `EntryNotFound` if no tag matches.
    /// - `Store` for any store failure.
    pub async fn search_by_tag(&self, raw_tag: &str) -> Result<Vec<WishlistEntry>> {
        let pattern = TagPattern::contains(raw_tag);
        if !self.store.exists_by_pattern(&pattern).await? {
            return Err(WishlistError::EntryNotFound(Missing::Tag(pattern.raw().to_owned())));
        }
        Ok(self.store.find_by_pattern(&pattern).await?)
    }

    /// Whether `customer_id` has `product_id` on their wishlist.
    ///
    /// Absence is a normal `false`, never an error.
    ///
    /// # Errors
    ///
    /// Returns `Store` for any store failure.
    pub async fn exists_by_customer_and_product(
        &self,
        customer_id: &str,
        product_id: &str,
    ) -> Result<bool> {
        Ok(self
            .store
            .exists_by_customer_and_product(customer_id, product_id)
            .await?)
    }
}
