//! HTTP route handlers for the wishlist server.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                         - Liveness check
//! GET    /health/ready                   - Readiness check (store probe)
//!
//! # Wishlist
//! POST   /wishlist                       - Create entry (JSON body)
//! DELETE /wishlist                       - Delete entry (JSON body)
//! GET    /wishlist/customer/{customerId} - List a customer's entries
//! GET    /wishlist/tags/{tag}            - Case-insensitive tag search
//! GET    /wishlist/exists?customerId=&productId= - Existence probe
//! ```

pub mod health;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/wishlist", post(wishlist::create).delete(wishlist::delete))
        .route("/wishlist/customer/{customer_id}", get(wishlist::list_by_customer))
        .route("/wishlist/tags/{tag}", get(wishlist::search_by_tag))
        .route("/wishlist/exists", get(wishlist::exists))
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(wishlist_routes())
}
