//! Middleware modules for the API server
//!
//! - `session`: PostgreSQL-backed session layer (tower-sessions)
//! - `auth`: Current-user extraction from the session
//! - `security`: Security response headers

pub mod auth;
pub mod security;
pub mod session;
