//! Domain models for admin.

pub mod roster;
pub mod session;

pub use roster::{AdminRosterEntry, AdminUserView};
pub use session::{CurrentUser, keys as session_keys};
