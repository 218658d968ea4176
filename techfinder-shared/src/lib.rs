//! # TechFinder Shared Library
//!
//! This crate contains the data layer and authentication primitives used
//! by the TechFinder API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and CRUD operations (users, products, wishlists)
//! - `auth`: Password hashing and credential verification
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the TechFinder shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
