//! Session-related types for admin authentication.
//!
//! Types stored in the session for authentication state. The session
//! identifies who is signed in; whether they are an admin is decided per
//! request by the roster check, never cached here.

use serde::{Deserialize, Serialize};

use velvet_plum_core::{Email, UserId};

/// Session-stored identity of the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Identity Provider user id.
    pub id: UserId,
    /// The user's email address.
    pub email: Email,
    /// Access token issued by the Identity Provider at sign-in.
    ///
    /// Needed to revoke the session on sign-out.
    pub access_token: String,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current signed-in user.
    pub const CURRENT_USER: &str = "current_user";
}
