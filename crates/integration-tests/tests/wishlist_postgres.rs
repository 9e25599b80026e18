//! Wishlist rules over the `PostgreSQL` store.
//!
//! These tests need a reachable database:
//!
//! ```bash
//! WISHLIST_DATABASE_URL=postgres://localhost/wishlist_test \
//!     cargo test -p wishlist-integration-tests --test wishlist_postgres -- --ignored
//! ```
//!
//! Migrations are applied on connect. Every test works under its own
//! customer id and tag prefix and deletes its rows afterwards.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use wishlist_core::{
    MAX_ENTRIES_PER_CUSTOMER, Missing, NewWishlistEntry, StoreError, WishlistEntry, WishlistError,
    WishlistRequest, WishlistRules, WishlistStore,
};
use wishlist_server::config::ServerConfig;
use wishlist_server::db::{self, PgWishlistStore};

async fn pg_rules() -> (WishlistRules, Arc<PgWishlistStore>) {
    let config = ServerConfig::from_env().expect("Failed to load configuration");
    let url = config
        .require_database_url()
        .expect("WISHLIST_DATABASE_URL must be set");
    let pool = db::create_pool(url, &config.store)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("../server/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let store = Arc::new(PgWishlistStore::new(pool));
    (WishlistRules::new(store.clone()), store)
}

/// Unique alphanumeric token, used as a customer id and as a tag prefix.
fn token() -> String {
    format!("it{}", Uuid::new_v4().simple())
}

fn new_entry(customer: &str, product: &str, tag: Option<&str>) -> NewWishlistEntry {
    WishlistRequest {
        customer_id: Some(customer.to_owned()),
        product_id: Some(product.to_owned()),
        tags_category: tag.map(String::from),
    }
    .validate()
    .unwrap()
}

async fn cleanup(store: &PgWishlistStore, customer_id: &str) {
    sqlx::query("DELETE FROM wishlist.entry WHERE customer_id = $1")
        .bind(customer_id)
        .execute(store.pool())
        .await
        .expect("Failed to clean up entries");
}

// =============================================================================
// Identity and uniqueness
// =============================================================================

#[tokio::test]
#[ignore = "Requires database"]
async fn test_pg_create_duplicate_delete_scenario() {
    let (rules, store) = pg_rules().await;
    let customer = token();

    let entry = rules
        .create(new_entry(&customer, "p1", Some("kitchen")))
        .await
        .unwrap();
    assert_eq!(entry.id().as_str(), format!("customer#{customer}-product#p1"));

    let err = rules
        .create(new_entry(&customer, "p1", Some("kitchen")))
        .await
        .unwrap_err();
    assert!(matches!(err, WishlistError::DuplicateEntry(ref id) if id == entry.id()));

    rules.delete(&customer, "p1").await.unwrap();
    assert!(!rules.exists_by_customer_and_product(&customer, "p1").await.unwrap());

    let err = rules.delete(&customer, "p1").await.unwrap_err();
    assert!(matches!(err, WishlistError::EntryNotFound(Missing::Entry(_))));

    cleanup(&store, &customer).await;
}

#[tokio::test]
#[ignore = "Requires database"]
async fn test_pg_insert_unique_violation_is_duplicate_key() {
    let (_, store) = pg_rules().await;
    let customer = token();
    let entry = WishlistEntry::from_stored(customer.clone(), "p1".to_owned(), None, Utc::now());

    store.insert(entry.clone()).await.unwrap();
    let err = store.insert(entry.clone()).await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateKey(ref id) if id == entry.id()));

    cleanup(&store, &customer).await;
}

#[tokio::test]
#[ignore = "Requires database"]
async fn test_pg_quota() {
    let (rules, store) = pg_rules().await;
    let customer = token();

    for i in 0..MAX_ENTRIES_PER_CUSTOMER {
        rules
            .create(new_entry(&customer, &format!("p{i}"), None))
            .await
            .unwrap();
    }

    let err = rules
        .create(new_entry(&customer, "one-more", None))
        .await
        .unwrap_err();
    assert!(matches!(err, WishlistError::QuotaExceeded { limit: 20, .. }));
    assert_eq!(
        store.count_by_customer_id(&customer).await.unwrap(),
        MAX_ENTRIES_PER_CUSTOMER
    );

    cleanup(&store, &customer).await;
}

// =============================================================================
// Ordering
// =============================================================================

#[tokio::test]
#[ignore = "Requires database"]
async fn test_pg_list_orders_by_created_at_then_id() {
    let (rules, store) = pg_rules().await;
    let customer = token();
    let t0 = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

    for (product, created_at) in [("p-b", t0 + Duration::seconds(2)), ("p-c", t0), ("p-a", t0)] {
        store
            .insert(WishlistEntry::from_stored(
                customer.clone(),
                product.to_owned(),
                None,
                created_at,
            ))
            .await
            .unwrap();
    }

    let entries = rules.list_by_customer(&customer).await.unwrap();
    let products: Vec<_> = entries.iter().map(WishlistEntry::product_id).collect();
    assert_eq!(products, ["p-a", "p-c", "p-b"]);
    assert_eq!(entries[0].created_at(), t0);

    cleanup(&store, &customer).await;
}

// =============================================================================
// Tag search
// =============================================================================

#[tokio::test]
#[ignore = "Requires database"]
async fn test_pg_search_metacharacters_are_literal() {
    let (rules, store) = pg_rules().await;
    let customer = token();
    let prefix = token();
    let tags = [
        "a-b#", "x&y", "a.b", "t~n", "(kids)", "[a-z]+", "^x$", "a|b", "{2}", "?", "*", "\\d",
        "50%", "under_score",
    ];

    for (i, tag) in tags.iter().enumerate() {
        let stored = format!("{prefix}{tag}tail");
        rules
            .create(new_entry(&customer, &format!("p{i}"), Some(&stored)))
            .await
            .unwrap();
    }

    for (i, tag) in tags.iter().enumerate() {
        let found = rules
            .search_by_tag(&format!("{prefix}{tag}").to_uppercase())
            .await
            .unwrap_or_else(|e| panic!("{tag}: {e}"));
        assert_eq!(found.len(), 1, "{tag} should match only itself");
        assert_eq!(found[0].product_id(), format!("p{i}"));
    }

    cleanup(&store, &customer).await;
}

#[tokio::test]
#[ignore = "Requires database"]
async fn test_pg_search_dot_does_not_match_any_character() {
    let (rules, store) = pg_rules().await;
    let customer = token();
    let prefix = token();
    rules
        .create(new_entry(&customer, "p1", Some(&format!("{prefix}aXb"))))
        .await
        .unwrap();

    let raw = format!("{prefix}a.b");
    let err = rules.search_by_tag(&raw).await.unwrap_err();
    assert!(matches!(err, WishlistError::EntryNotFound(Missing::Tag(ref t)) if *t == raw));

    cleanup(&store, &customer).await;
}

#[tokio::test]
#[ignore = "Requires database"]
async fn test_pg_null_tag_never_matches() {
    let (rules, store) = pg_rules().await;
    let customer = token();
    rules.create(new_entry(&customer, "p1", None)).await.unwrap();

    match rules.search_by_tag("").await {
        Ok(found) => assert!(found.iter().all(|e| e.customer_id() != customer)),
        Err(WishlistError::EntryNotFound(_)) => {}
        Err(e) => panic!("unexpected error: {e}"),
    }

    cleanup(&store, &customer).await;
}

#[tokio::test]
#[ignore = "Requires database"]
async fn test_pg_ping() {
    let (_, store) = pg_rules().await;
    store.ping().await.unwrap();
}
