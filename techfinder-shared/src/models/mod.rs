//! Database models for TechFinder
//!
//! This module contains all database models and their CRUD operations.
//!
//! # Models
//!
//! - `user`: User accounts and credentials
//! - `product`: Catalog entries
//! - `wishlist`: User-to-product wishlist associations
//!
//! # Example
//!
//! ```no_run
//! use techfinder_shared::models::user::{CreateUser, User};
//! use techfinder_shared::db::pool::{create_pool, DatabaseConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(DatabaseConfig::default()).await?;
//!
//! let new_user = CreateUser {
//!     username: "alice".to_string(),
//!     email: "alice@example.com".to_string(),
//!     password_hash: "$argon2id$...".to_string(),
//! };
//!
//! let user = User::create(&pool, new_user).await?;
//! # Ok(())
//! # }
//! ```

pub mod product;
pub mod user;
pub mod wishlist;
