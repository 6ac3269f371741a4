//! Roster management error types.

use thiserror::Error;

use crate::identity::IdentityError;
use crate::store::StoreError;

/// Errors that can occur during roster management operations.
///
/// The authorization check ([`super::AdminRosterService::is_admin`]) never
/// returns these - it fails closed to `false` instead. Management
/// operations propagate them to the caller with no retries; the roster is
/// left unchanged.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The email failed structural validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] velvet_plum_core::EmailError),

    /// No Identity Provider user has this email.
    #[error("no user exists with this email")]
    UserNotFound,

    /// The resolved user already has a roster entry.
    #[error("this user already has admin privileges")]
    AlreadyAdmin,

    /// The Identity Provider call failed.
    #[error("identity provider error: {0}")]
    Identity(#[from] IdentityError),

    /// The underlying Row Store operation failed.
    #[error("row store error: {0}")]
    Store(#[from] StoreError),
}
