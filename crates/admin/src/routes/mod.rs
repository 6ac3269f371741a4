//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! GET  /health/ready           - Readiness check
//!
//! # Auth (pass-through to the Identity Provider)
//! POST /auth/login             - Password sign-in
//! POST /auth/logout            - Sign out, revoke token
//! POST /auth/recover           - Request a password reset email
//!
//! # Admin roster (admin only)
//! GET    /admin/users          - List admins (roster joined with emails)
//! POST   /admin/users          - Grant admin privileges by email
//! DELETE /admin/users/{id}     - Revoke admin privileges by user id
//! ```

pub mod admin_users;
pub mod auth;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Build the application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/recover", post(auth::recover))
        // Admin roster
        .route(
            "/admin/users",
            get(admin_users::index).post(admin_users::create),
        )
        .route("/admin/users/{id}", delete(admin_users::remove))
}
