//! Core types for the wishlist service.
//!
//! This module provides the entry model, its composite identifier, the inbound
//! request records, and the tag search pattern.

pub mod entry;
pub mod id;
pub mod pattern;
pub mod request;

pub use entry::{NewWishlistEntry, WishlistEntry};
pub use id::{EntryId, derive_id};
pub use pattern::TagPattern;
pub use request::{EntryKey, ValidationErrors, WishlistRequest};
