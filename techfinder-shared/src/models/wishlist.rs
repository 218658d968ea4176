//! Wishlist association model.
//!
//! Each row links one user to one product. The (user_id, product_id)
//! pair is unique, so a product can appear at most once in a given
//! user's wishlist. Insertion and the duplicate check are a single
//! statement; two concurrent adds of the same pair cannot both land.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::models::product::Product;

/// A single wishlist entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WishlistItem {
    /// Unique numeric row ID
    pub id: i64,

    /// Owning user
    pub user_id: i64,

    /// Wishlisted product
    pub product_id: i64,

    /// When the product was added
    pub added_at: DateTime<Utc>,
}

impl WishlistItem {
    /// Adds a product to a user's wishlist
    ///
    /// Returns the new item, or None if the pair already exists. The
    /// insert and the duplicate check are one atomic statement
    /// (`ON CONFLICT DO NOTHING`), so exactly one row can ever exist
    /// for a pair.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The user or product id does not exist (foreign key violation)
    /// - Database connection fails
    pub async fn add(
        pool: &PgPool,
        user_id: i64,
        product_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let item = sqlx::query_as::<_, WishlistItem>(
            r#"
            INSERT INTO wishlist_items (user_id, product_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, product_id) DO NOTHING
            RETURNING id, user_id, product_id, added_at
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(pool)
        .await?;

        Ok(item)
    }

    /// Removes a product from a user's wishlist
    ///
    /// Returns true if a row was removed, false if the pair was absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    pub async fn remove(
        pool: &PgPool,
        user_id: i64,
        product_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM wishlist_items WHERE user_id = $1 AND product_id = $2",
        )
        .bind(user_id)
        .bind(product_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Whether a product is in a user's wishlist
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    pub async fn contains(
        pool: &PgPool,
        user_id: i64,
        product_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM wishlist_items WHERE user_id = $1 AND product_id = $2)",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Lists the products in a user's wishlist, oldest entry first
    ///
    /// Returns the products themselves rather than the association rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    pub async fn products_for_user(
        pool: &PgPool,
        user_id: i64,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT p.id, p.name, p.description, p.price, p.image_url, p.external_link,
                   p.category, p.created_at, p.updated_at
            FROM wishlist_items wi
            JOIN products p ON p.id = wi.product_id
            WHERE wi.user_id = $1
            ORDER BY wi.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(products)
    }

    /// Counts the entries in a user's wishlist
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    pub async fn count_for_user(pool: &PgPool, user_id: i64) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM wishlist_items WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }
}
