//! Inbound request records and their validation.
//!
//! The transport layer decodes a body into a [`WishlistRequest`] and calls
//! [`WishlistRequest::validate`] before anything reaches
//! [`WishlistRules`](crate::WishlistRules). Rules never re-check field shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entry::NewWishlistEntry;

/// Message reported when `customerId` is missing or blank.
pub const CUSTOMER_ID_REQUIRED: &str = "Customer ID is required";

/// Message reported when `productId` is missing or blank.
pub const PRODUCT_ID_REQUIRED: &str = "Product ID is required";

/// Field-level validation failures, keyed by the wire field name.
#[derive(thiserror::Error, Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[error("Validation failed")]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    /// Create an empty set of validation errors.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record a failure for `field`. The first message per field wins.
    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_owned())
            .or_insert_with(|| message.to_owned());
    }

    /// Returns `true` if no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Message recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Field to message mapping.
    #[must_use]
    pub const fn fields(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

/// Take `value` if it is present and not blank, otherwise record `message`.
fn require_non_blank(
    value: Option<String>,
    field: &str,
    message: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            errors.add(field, message);
            None
        }
    }
}

/// The natural key of an entry, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryKey {
    /// Owning customer.
    pub customer_id: String,
    /// Wished-for product.
    pub product_id: String,
}

impl EntryKey {
    /// Validate a raw `(customer_id, product_id)` pair.
    ///
    /// # Errors
    ///
    /// Returns every failing field at once.
    pub fn validate(
        customer_id: Option<String>,
        product_id: Option<String>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let customer_id = require_non_blank(customer_id, "customerId", CUSTOMER_ID_REQUIRED, &mut errors);
        let product_id = require_non_blank(product_id, "productId", PRODUCT_ID_REQUIRED, &mut errors);

        match (customer_id, product_id) {
            (Some(customer_id), Some(product_id)) => Ok(Self {
                customer_id,
                product_id,
            }),
            _ => Err(errors),
        }
    }
}

/// Wire shape of a create or delete request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistRequest {
    /// Owning customer; required.
    pub customer_id: Option<String>,
    /// Wished-for product; required.
    pub product_id: Option<String>,
    /// Optional category label. Empty string is kept as-is.
    pub tags_category: Option<String>,
}

impl WishlistRequest {
    /// Validate into an entry ready for [`WishlistRules::create`](crate::WishlistRules::create).
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` naming each missing or blank key field.
    pub fn validate(self) -> Result<NewWishlistEntry, ValidationErrors> {
        let key = EntryKey::validate(self.customer_id, self.product_id)?;
        Ok(NewWishlistEntry::new(
            key.customer_id,
            key.product_id,
            self.tags_category,
        ))
    }

    /// Validate only the natural key, ignoring `tagsCategory`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` naming each missing or blank key field.
    pub fn validate_key(self) -> Result<EntryKey, ValidationErrors> {
        EntryKey::validate(self.customer_id, self.product_id)
    }
}
