//! Wishlist Core - entry identity and business rules.
//!
//! This crate holds everything about the wishlist that has invariants:
//! - the composite identifier that makes a `(customer, product)` pair
//!   duplicate-proof at the storage layer
//! - the per-customer quota
//! - tag search pattern construction with escaping of user input
//! - request validation
//!
//! # Architecture
//!
//! The core performs no network I/O. Persistence goes through the
//! [`WishlistStore`] trait, injected into [`WishlistRules`] as an
//! `Arc<dyn WishlistStore>`. [`MemoryStore`] is a process-local
//! implementation; the `PostgreSQL` implementation lives in the server crate.
//!
//! # Modules
//!
//! - [`types`] - Entry model, identifiers, requests, tag patterns
//! - [`store`] - Store trait and the in-memory store
//! - [`rules`] - Quota, existence checks, and search policy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod rules;
pub mod store;
pub mod types;

pub use rules::{MAX_ENTRIES_PER_CUSTOMER, Missing, WishlistError, WishlistRules};
pub use store::{MemoryStore, StoreError, WishlistStore};
pub use types::*;
