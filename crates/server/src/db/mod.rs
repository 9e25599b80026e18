//! Database operations for the wishlist `PostgreSQL` store.
//!
//! # Database: `wishlist`
//!
//! ## Tables
//!
//! - `wishlist.entry` - One row per (customer, product), keyed by composite id
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p wishlist-cli -- migrate
//! ```

pub mod entries;

use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::config::StoreConfig;

pub use entries::PgWishlistStore;

/// Create a `PostgreSQL` connection pool.
///
/// Every connection gets a `statement_timeout` equal to `store.timeout`, and
/// acquiring a connection is bounded by the same duration, so no store call
/// can block indefinitely.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be
/// established.
pub async fn create_pool(
    database_url: &SecretString,
    store: &StoreConfig,
) -> Result<PgPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(database_url.expose_secret())?
        .options([("statement_timeout", store.timeout.as_millis().to_string())]);

    PgPoolOptions::new()
        .max_connections(store.max_connections)
        .min_connections(1)
        .acquire_timeout(store.timeout)
        .connect_with(options)
        .await
}
