//! Wire types for the Identity Provider API.

use serde::{Deserialize, Serialize};

use velvet_plum_core::UserId;

/// A user record as returned by the provider.
///
/// `email` is optional: phone-only and anonymous sign-ups have none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityUser {
    /// Provider-issued user id.
    pub id: UserId,
    /// The user's email address, if any.
    #[serde(default)]
    pub email: Option<String>,
}

/// Response envelope for the admin user listing endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct UserListing {
    #[serde(default)]
    pub users: Vec<IdentityUser>,
}

/// A provider session returned by password sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    /// Bearer token for subsequent per-user calls.
    pub access_token: String,
    /// The signed-in user.
    pub user: IdentityUser,
}
