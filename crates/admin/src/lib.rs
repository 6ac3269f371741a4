//! Velvet Plum Admin library.
//!
//! This crate provides the admin panel backend as a library, allowing it to
//! be tested and reused by the CLI.
//!
//! # Security
//!
//! This crate holds the backend service-role key, which bypasses row-level
//! security on the hosted backend. Only deploy on trusted infrastructure.
//!
//! The route guard re-checks roster membership on every request and fails
//! closed; there is no cached or assumed admin status.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod identity;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
