//! Integration tests for Velvet Plum.
//!
//! # Running Tests
//!
//! ```bash
//! # Point the tests at a running admin server
//! export ADMIN_BASE_URL=http://localhost:3001
//!
//! # Credentials of an existing admin on the test backend
//! export TEST_ADMIN_EMAIL=admin@example.com
//! export TEST_ADMIN_PASSWORD=...
//!
//! cargo test -p velvet-plum-integration-tests -- --ignored
//! ```
//!
//! The tests exercise the real HTTP surface (session cookies, the roster
//! guard, roster mutations) against a live backend; they are `#[ignore]`d
//! by default because they need that environment.
