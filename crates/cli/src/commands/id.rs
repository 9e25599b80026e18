//! Composite identifier command.
//!
//! Prints the id a `(customer, product)` pair is stored under, for looking up
//! rows by hand.

use wishlist_core::EntryId;

/// Composite id for the pair, as stored.
#[must_use]
pub fn derive(customer_id: &str, product_id: &str) -> String {
    EntryId::derive(customer_id, product_id).into_inner()
}
