//! API route handlers
//!
//! Organized by resource:
//!
//! - `health`: Health check endpoint
//! - `auth`: Registration, login, logout, session status
//! - `products`: Product catalog CRUD
//! - `users`: User profile access
//! - `wishlist`: Per-user wishlist management

pub mod auth;
pub mod health;
pub mod products;
pub mod users;
pub mod wishlist;
