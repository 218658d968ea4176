//! Product model and database operations.
//!
//! Catalog entries carry a unique name; price is a non-negative
//! NUMERIC(10,2) mapped to `rust_decimal::Decimal`.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE products (
//!     id            BIGSERIAL PRIMARY KEY,
//!     name          VARCHAR(200) NOT NULL UNIQUE,
//!     description   TEXT NOT NULL,
//!     price         NUMERIC(10, 2) NOT NULL CHECK (price >= 0),
//!     image_url     VARCHAR(500),
//!     external_link VARCHAR(500),
//!     category      VARCHAR(100),
//!     created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Product model representing a catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Unique numeric product ID
    pub id: i64,

    /// Display name, unique across the catalog
    pub name: String,

    /// Full description
    pub description: String,

    /// Non-negative price
    pub price: Decimal,

    /// Optional image reference
    pub image_url: Option<String>,

    /// Optional link to an external product page
    pub external_link: Option<String>,

    /// Optional category label
    pub category: Option<String>,

    /// When the product was created
    pub created_at: DateTime<Utc>,

    /// When the product was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProduct {
    /// Display name
    pub name: String,

    /// Full description
    pub description: String,

    /// Non-negative price
    pub price: Decimal,

    /// Optional image reference
    pub image_url: Option<String>,

    /// Optional link to an external product page
    pub external_link: Option<String>,

    /// Optional category label
    pub category: Option<String>,
}

/// Input for updating an existing product
///
/// All fields are optional. Only non-None fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProduct {
    /// New display name
    pub name: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New price
    pub price: Option<Decimal>,

    /// New image reference (use Some(None) to clear)
    pub image_url: Option<Option<String>>,

    /// New external link (use Some(None) to clear)
    pub external_link: Option<Option<String>>,

    /// New category (use Some(None) to clear)
    pub category: Option<Option<String>>,
}

impl UpdateProduct {
    /// Whether this update carries any field at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image_url.is_none()
            && self.external_link.is_none()
            && self.category.is_none()
    }
}

const PRODUCT_COLUMNS: &str =
    "id, name, description, price, image_url, external_link, category, created_at, updated_at";

impl Product {
    /// Creates a new product
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A product with the same name already exists (unique constraint)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateProduct) -> Result<Self, sqlx::Error> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, price, image_url, external_link, category)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, description, price, image_url, external_link, category,
                      created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.price)
        .bind(data.image_url)
        .bind(data.external_link)
        .bind(data.category)
        .fetch_one(pool)
        .await?;

        Ok(product)
    }

    /// Finds a product by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(product)
    }

    /// Finds a product by name (exact match)
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE name = $1");
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await?;

        Ok(product)
    }

    /// Lists all products in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id ASC");
        let products = sqlx::query_as::<_, Product>(&query).fetch_all(pool).await?;

        Ok(products)
    }

    /// Updates an existing product
    ///
    /// Only non-None fields in `data` are written. The `updated_at`
    /// timestamp is always bumped.
    ///
    /// Returns the updated product, or None if the id was absent.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The new name collides with another product
    /// - Database connection fails
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateProduct,
    ) -> Result<Option<Self>, sqlx::Error> {
        if data.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        // Build the update statement from whichever fields are present
        let mut query = String::from("UPDATE products SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", name = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.price.is_some() {
            bind_count += 1;
            query.push_str(&format!(", price = ${}", bind_count));
        }
        if data.image_url.is_some() {
            bind_count += 1;
            query.push_str(&format!(", image_url = ${}", bind_count));
        }
        if data.external_link.is_some() {
            bind_count += 1;
            query.push_str(&format!(", external_link = ${}", bind_count));
        }
        if data.category.is_some() {
            bind_count += 1;
            query.push_str(&format!(", category = ${}", bind_count));
        }

        query.push_str(&format!(
            " WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        ));

        let mut q = sqlx::query_as::<_, Product>(&query).bind(id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(price) = data.price {
            q = q.bind(price);
        }
        if let Some(image_url) = data.image_url {
            q = q.bind(image_url);
        }
        if let Some(external_link) = data.external_link {
            q = q.bind(external_link);
        }
        if let Some(category) = data.category {
            q = q.bind(category);
        }

        let product = q.fetch_optional(pool).await?;

        Ok(product)
    }

    /// Deletes a product by ID
    ///
    /// Wishlist items referencing the product are removed by the
    /// ON DELETE CASCADE constraint on `wishlist_items.product_id`.
    ///
    /// Returns true if a product was deleted, false if the id was absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts total number of products
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
