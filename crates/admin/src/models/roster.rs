//! Admin roster entities.
//!
//! The roster is the set of user ids granted administrative privilege.
//! Membership is binary - there are no roles, scopes, or expiry.

use serde::{Deserialize, Serialize};

use velvet_plum_core::UserId;

/// A row in the admin roster table.
///
/// The id is a foreign key into the Identity Provider's user set and is
/// unique in the table (enforced by the Row Store's constraint, not just
/// by our pre-insert check).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminRosterEntry {
    /// Identity Provider user id of the admin.
    pub id: UserId,
}

impl AdminRosterEntry {
    /// Create a roster entry for a user id.
    #[must_use]
    pub const fn new(id: UserId) -> Self {
        Self { id }
    }
}

/// Presentation view of an admin: roster id joined with the provider email.
///
/// Derived at read time by [`crate::services::roster::AdminRosterService::list_admins`];
/// never persisted. `email` is the fallback label when the provider no
/// longer has a record for the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUserView {
    /// Identity Provider user id.
    pub id: UserId,
    /// The user's email, or a fallback label for stale roster ids.
    pub email: String,
}
