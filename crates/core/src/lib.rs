//! Velvet Plum Core - Shared types library.
//!
//! This crate provides common types used across all Velvet Plum components:
//! - `admin` - Internal administration panel backend
//! - `cli` - Command-line tools for roster management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for user identifiers and email addresses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
