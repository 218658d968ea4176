//! Product catalog endpoints.
//!
//! # Endpoints
//!
//! - `GET    /api/products` - List all products
//! - `GET    /api/products/:id` - Fetch one product
//! - `POST   /api/products` - Create a product
//! - `PUT    /api/products/:id` - Update a product
//! - `DELETE /api/products/:id` - Delete a product

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use techfinder_shared::models::product::{CreateProduct, Product, UpdateProduct};

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ValidatedJson,
};

/// Create product request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    /// Display name
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    /// Full description
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    /// Non-negative price
    #[validate(custom(function = validate_price))]
    pub price: Decimal,

    /// Image reference
    #[validate(length(min = 1, max = 500, message = "Image URL must be 1-500 characters"))]
    pub image_url: String,

    /// Optional link to an external product page
    #[validate(length(max = 500, message = "External link must be at most 500 characters"))]
    pub external_link: Option<String>,

    /// Optional category label
    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,
}

/// Update product request
///
/// Absent fields are left untouched.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProductRequest {
    /// New display name
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,

    /// New description
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: Option<String>,

    /// New price
    #[validate(custom(function = validate_optional_price))]
    pub price: Option<Decimal>,

    /// New image reference
    pub image_url: Option<String>,

    /// New external link
    pub external_link: Option<String>,

    /// New category label
    pub category: Option<String>,
}

/// Single-product response
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    /// Always true
    pub success: bool,

    /// The product
    pub product: Product,
}

/// Product list response
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    /// Always true
    pub success: bool,

    /// Products in insertion order
    pub products: Vec<Product>,

    /// Number of products returned
    pub count: usize,
}

/// Deletion response
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    /// Always true
    pub success: bool,
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        let mut error = ValidationError::new("price");
        error.message = Some("Price must be non-negative".into());
        return Err(error);
    }
    Ok(())
}

fn validate_optional_price(price: &Decimal) -> Result<(), ValidationError> {
    validate_price(price)
}

/// List all products
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<ProductListResponse>> {
    let products = Product::list_all(&state.db).await?;
    let count = products.len();

    Ok(Json(ProductListResponse {
        success: true,
        products,
        count,
    }))
}

/// Fetch one product by id
///
/// # Errors
///
/// - `404 Not Found`: No product with that id
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ProductResponse>> {
    let product = Product::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    Ok(Json(ProductResponse {
        success: true,
        product,
    }))
}

/// Create a product
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed (missing fields, negative price)
/// - `409 Conflict`: A product with the same name exists
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateProductRequest>,
) -> ApiResult<(StatusCode, Json<ProductResponse>)> {
    let product = Product::create(
        &state.db,
        CreateProduct {
            name: req.name,
            description: req.description,
            price: req.price,
            image_url: Some(req.image_url),
            external_link: req.external_link,
            category: req.category,
        },
    )
    .await?;

    tracing::info!(product_id = product.id, name = %product.name, "Product created");

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            success: true,
            product,
        }),
    ))
}

/// Update a product
///
/// Only the supplied fields change; `updated_at` is bumped.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `404 Not Found`: No product with that id
/// - `409 Conflict`: The new name collides with another product
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateProductRequest>,
) -> ApiResult<Json<ProductResponse>> {
    let update = UpdateProduct {
        name: req.name,
        description: req.description,
        price: req.price,
        image_url: req.image_url.map(Some),
        external_link: req.external_link.map(Some),
        category: req.category.map(Some),
    };

    let product = Product::update(&state.db, id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    Ok(Json(ProductResponse {
        success: true,
        product,
    }))
}

/// Delete a product
///
/// Wishlist entries referencing the product are removed by cascade.
///
/// # Errors
///
/// - `404 Not Found`: No product with that id
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DeletedResponse>> {
    let deleted = Product::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Product not found".to_string()));
    }

    tracing::info!(product_id = id, "Product deleted");

    Ok(Json(DeletedResponse { success: true }))
}
