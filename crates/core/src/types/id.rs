//! Composite identifiers for wishlist entries.
//!
//! An entry's identifier is a pure function of its two natural-key fields,
//! `customer_id` and `product_id`. Inserting a second entry for the same pair
//! therefore collides on the store's primary key, which is what makes the
//! wishlist duplicate-proof. There is no separate uniqueness index.
//!
//! # Format
//!
//! ```text
//! customer#<customer_id>-product#<product_id>
//! ```
//!
//! The field values are embedded verbatim. A customer id containing
//! `-product#` can in theory produce the same identifier as a different
//! pair (see [`EntryId::derive`]); values are not escaped.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Tag that precedes the customer id in a composite identifier.
pub const CUSTOMER_TAG: &str = "customer#";

/// Separator and tag that precede the product id in a composite identifier.
pub const PRODUCT_TAG: &str = "-product#";

/// Identifier of a wishlist entry, derived from `(customer_id, product_id)`.
///
/// ## Examples
///
/// ```
/// use wishlist_core::EntryId;
///
/// let id = EntryId::derive("u1", "p1");
/// assert_eq!(id.as_str(), "customer#u1-product#p1");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Derive the composite identifier for a `(customer_id, product_id)` pair.
    ///
    /// Deterministic and total. Distinct pairs yield distinct identifiers as
    /// long as neither value contains [`PRODUCT_TAG`]; when they do, two pairs
    /// may collide (`("a-product#b", "c")` and `("a", "b-product#c")`). This is
    /// a known limitation of the format, which stays human readable.
    #[must_use]
    pub fn derive(customer_id: &str, product_id: &str) -> Self {
        let mut id = String::with_capacity(
            CUSTOMER_TAG.len() + customer_id.len() + PRODUCT_TAG.len() + product_id.len(),
        );
        id.push_str(CUSTOMER_TAG);
        id.push_str(customer_id);
        id.push_str(PRODUCT_TAG);
        id.push_str(product_id);
        Self(id)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `EntryId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Derive the composite identifier for a `(customer_id, product_id)` pair.
///
/// Shorthand for [`EntryId::derive`].
#[must_use]
pub fn derive_id(customer_id: &str, product_id: &str) -> EntryId {
    EntryId::derive(customer_id, product_id)
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for EntryId {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for EntryId {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for EntryId {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
