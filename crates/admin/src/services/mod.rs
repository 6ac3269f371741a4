//! Business logic services for admin.

pub mod roster;

pub use roster::{AdminRosterService, RosterError};
