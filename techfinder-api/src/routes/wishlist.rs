//! Wishlist endpoints.
//!
//! All operations act on the authenticated user's own wishlist; the
//! user id comes from the session, never from the request body.
//!
//! # Endpoints
//!
//! - `GET    /api/wishlist` - List wishlisted products
//! - `POST   /api/wishlist` - Add a product
//! - `DELETE /api/wishlist` - Remove a product

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use techfinder_shared::models::product::Product;
use techfinder_shared::models::wishlist::WishlistItem;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ValidatedJson,
    middleware::auth::CurrentUser,
};

/// Add/remove request
#[derive(Debug, Deserialize, Validate)]
pub struct WishlistRequest {
    /// Product to add or remove
    #[validate(range(min = 1, message = "Product id must be positive"))]
    pub product_id: i64,
}

/// Wishlist contents response
#[derive(Debug, Serialize)]
pub struct WishlistResponse {
    /// Always true
    pub success: bool,

    /// Wishlisted products, oldest entry first
    pub products: Vec<Product>,

    /// Number of products returned
    pub count: usize,
}

/// Response for a newly added entry
#[derive(Debug, Serialize)]
pub struct WishlistItemResponse {
    /// Always true
    pub success: bool,

    /// The new association row
    pub item: WishlistItem,
}

/// Removal response
#[derive(Debug, Serialize)]
pub struct RemovedResponse {
    /// Always true
    pub success: bool,
}

/// List the current user's wishlisted products
///
/// # Errors
///
/// - `401 Unauthorized`: No session
pub async fn list_wishlist(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
) -> ApiResult<Json<WishlistResponse>> {
    let products = WishlistItem::products_for_user(&state.db, current.user_id).await?;
    let count = products.len();

    Ok(Json(WishlistResponse {
        success: true,
        products,
        count,
    }))
}

/// Add a product to the current user's wishlist
///
/// Adding is atomic; when two requests race on the same pair, exactly
/// one row lands and the other request sees the conflict.
///
/// # Errors
///
/// - `401 Unauthorized`: No session
/// - `404 Not Found`: No product with that id
/// - `409 Conflict`: Product already in the wishlist
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    ValidatedJson(req): ValidatedJson<WishlistRequest>,
) -> ApiResult<(StatusCode, Json<WishlistItemResponse>)> {
    // Distinguish "no such product" from "already wishlisted" up front;
    // the insert itself still catches a product deleted in between.
    if Product::find_by_id(&state.db, req.product_id).await?.is_none() {
        return Err(ApiError::NotFound("Product not found".to_string()));
    }

    let item = WishlistItem::add(&state.db, current.user_id, req.product_id)
        .await?
        .ok_or_else(|| ApiError::Conflict("Product already in wishlist".to_string()))?;

    tracing::info!(
        user_id = current.user_id,
        product_id = req.product_id,
        "Product added to wishlist"
    );

    Ok((
        StatusCode::CREATED,
        Json(WishlistItemResponse {
            success: true,
            item,
        }),
    ))
}

/// Remove a product from the current user's wishlist
///
/// # Errors
///
/// - `401 Unauthorized`: No session
/// - `404 Not Found`: Product not in the wishlist
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    ValidatedJson(req): ValidatedJson<WishlistRequest>,
) -> ApiResult<Json<RemovedResponse>> {
    let removed = WishlistItem::remove(&state.db, current.user_id, req.product_id).await?;
    if !removed {
        return Err(ApiError::NotFound("Product not in wishlist".to_string()));
    }

    tracing::info!(
        user_id = current.user_id,
        product_id = req.product_id,
        "Product removed from wishlist"
    );

    Ok(Json(RemovedResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wishlist_request_rejects_non_positive_id() {
        let req = WishlistRequest { product_id: 0 };
        assert!(req.validate().is_err());

        let req = WishlistRequest { product_id: -5 };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_wishlist_request_accepts_positive_id() {
        let req = WishlistRequest { product_id: 1 };
        assert!(req.validate().is_ok());
    }
}
