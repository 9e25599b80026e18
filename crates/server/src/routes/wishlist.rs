//! Wishlist route handlers.
//!
//! Each handler validates its input, calls one [`WishlistRules`] operation and
//! wraps the result in a JSON envelope. Failures become [`AppError`].
//!
//! [`WishlistRules`]: wishlist_core::WishlistRules
//! [`AppError`]: crate::error::AppError

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use wishlist_core::{EntryKey, WishlistEntry, WishlistRequest};

use crate::error::Result;
use crate::state::AppState;

/// Plain acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Response for a created entry.
#[derive(Debug, Serialize)]
pub struct SavedResponse {
    pub message: &'static str,
    pub wishlist: WishlistEntry,
}

/// Response for list and search.
#[derive(Debug, Serialize)]
pub struct WishlistsResponse {
    pub wishlists: Vec<WishlistEntry>,
}

/// Response for the existence probe.
#[derive(Debug, Serialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

/// Query string of `GET /wishlist/exists`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistsQuery {
    pub customer_id: Option<String>,
    pub product_id: Option<String>,
}

/// Add a product to a customer's wishlist.
///
/// # Errors
///
/// 400 on invalid input, 409 on quota or duplicate, 500 on store failure.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<WishlistRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SavedResponse>)> {
    let Json(request) = payload?;
    let entry = request.validate()?;

    let customer_id = entry.customer_id().to_owned();
    let saved = state.rules().create(entry).await.inspect_err(|e| {
        tracing::info!(customer_id = %customer_id, error = %e, "Wishlist entry rejected");
    })?;

    tracing::info!(id = %saved.id(), "Wishlist entry created");
    Ok((
        StatusCode::CREATED,
        Json(SavedResponse {
            message: "Wishlist saved successfully",
            wishlist: saved,
        }),
    ))
}

/// Remove a product from a customer's wishlist.
///
/// # Errors
///
/// 400 on invalid input, 404 if the entry does not exist, 500 on store failure.
#[instrument(skip_all)]
pub async fn delete(
    State(state): State<AppState>,
    payload: std::result::Result<Json<WishlistRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let Json(request) = payload?;
    let EntryKey {
        customer_id,
        product_id,
    } = request.validate_key()?;

    state.rules().delete(&customer_id, &product_id).await?;

    tracing::info!(customer_id = %customer_id, product_id = %product_id, "Wishlist entry deleted");
    Ok(Json(MessageResponse {
        message: "Wishlist deleted successfully",
    }))
}

/// List a customer's wishlist.
///
/// # Errors
///
/// 404 if the customer has no entries, 500 on store failure.
#[instrument(skip(state))]
pub async fn list_by_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<WishlistsResponse>> {
    let wishlists = state.rules().list_by_customer(&customer_id).await?;
    Ok(Json(WishlistsResponse { wishlists }))
}

/// Search entries whose tag contains the given text, ignoring case.
///
/// # Errors
///
/// 404 if nothing matches, 500 on store failure.
#[instrument(skip(state))]
pub async fn search_by_tag(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<WishlistsResponse>> {
    let wishlists = state.rules().search_by_tag(&tag).await?;
    Ok(Json(WishlistsResponse { wishlists }))
}

/// Whether a customer has a product on their wishlist.
///
/// # Errors
///
/// 400 if either parameter is missing or blank, 500 on store failure.
#[instrument(skip_all)]
pub async fn exists(
    State(state): State<AppState>,
    query: std::result::Result<Query<ExistsQuery>, QueryRejection>,
) -> Result<Json<ExistsResponse>> {
    let Query(query) = query?;
    let key = EntryKey::validate(query.customer_id, query.product_id)?;

    let exists = state
        .rules()
        .exists_by_customer_and_product(&key.customer_id, &key.product_id)
        .await?;
    Ok(Json(ExistsResponse { exists }))
}
