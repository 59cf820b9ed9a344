//! Authentication module for JWT-based auth with Google OAuth login.
//!
//! This module provides:
//! - The Google OAuth flow (authorize redirect, code exchange, userinfo)
//! - Identity reconciliation against the user store
//! - JWT session token creation and validation
//! - `require_auth` middleware for protecting routes

pub mod google;
mod handlers;
pub mod jwt;
mod middleware;
pub mod reconcile;
pub mod types;

pub use handlers::{auth_callback, auth_login, auth_me, auth_profile};
pub use middleware::{extract_auth_user, require_auth};
