//! Admin roster service.
//!
//! The one invariant-bearing subsystem of the admin panel: deciding who is
//! an admin and mutating that set. Everything else in the panel hangs off
//! [`AdminRosterService::is_admin`], so its failure policy matters - it
//! fails closed and never errors.
//!
//! Membership is binary and keyed by Identity Provider user id. Adding an
//! existing member is a domain error; removing a non-member is success
//! (the end state is achieved either way).

mod error;

pub use error::RosterError;

use velvet_plum_core::{Email, UserId};

use crate::identity::IdentityProvider;
use crate::models::{AdminRosterEntry, AdminUserView};
use crate::store::{RosterStore, StoreError};

/// Display label for roster ids whose user record no longer exists.
///
/// Stale ids are not pruned; the listing surfaces them under this label so
/// they can be removed by hand.
pub const UNKNOWN_USER_LABEL: &str = "unknown user";

/// Admin roster service.
///
/// Generic over its two collaborators so tests can substitute in-memory
/// fakes; production wires in [`crate::store::RestRosterStore`] and
/// [`crate::identity::RestIdentityClient`].
pub struct AdminRosterService<S, I> {
    store: S,
    identity: I,
}

impl<S, I> AdminRosterService<S, I>
where
    S: RosterStore,
    I: IdentityProvider,
{
    /// Create a new roster service over a store and an identity provider.
    #[must_use]
    pub const fn new(store: S, identity: I) -> Self {
        Self { store, identity }
    }

    /// Check whether a user id is on the admin roster.
    ///
    /// A missing or empty id is `false` without any store round trip.
    /// Otherwise a filtered count is tried first; a zero or failed count
    /// falls back to a direct existence fetch. Any unrecoverable failure
    /// resolves to `false` - access control fails closed, and this function
    /// never returns an error.
    pub async fn is_admin(&self, user_id: Option<&UserId>) -> bool {
        let Some(id) = user_id else {
            tracing::debug!("no user id provided to is_admin");
            return false;
        };
        if id.is_empty() {
            tracing::debug!("empty user id provided to is_admin");
            return false;
        }

        match self.store.count(id).await {
            Ok(count) if count > 0 => return true,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(user_id = %id, "admin check count failed: {e}");
            }
        }

        // Fallback: direct existence fetch.
        match self.store.get(id).await {
            Ok(entry) => entry.is_some(),
            Err(e) => {
                tracing::warn!(user_id = %id, "admin check fetch failed, denying: {e}");
                false
            }
        }
    }

    /// Grant admin privileges to the user with this email.
    ///
    /// The email is trimmed and validated, then resolved to a user id by
    /// scanning the full provider listing (no indexed lookup by email is
    /// available on the provider). The pre-insert membership check is a UX
    /// nicety; the store's unique constraint is what actually holds under
    /// concurrent adds, so a lost race still comes back as `AlreadyAdmin`.
    ///
    /// # Errors
    ///
    /// - [`RosterError::InvalidEmail`] if the email is structurally invalid.
    /// - [`RosterError::UserNotFound`] if no provider user has this email.
    /// - [`RosterError::AlreadyAdmin`] if the user is already on the roster.
    /// - [`RosterError::Identity`] / [`RosterError::Store`] on collaborator
    ///   failures; the roster is unchanged.
    pub async fn add_admin(&self, email: &str) -> Result<AdminRosterEntry, RosterError> {
        let email = Email::parse(email.trim())?;

        let users = self.identity.list_users().await?;
        let user = users
            .into_iter()
            .find(|u| u.email.as_deref() == Some(email.as_str()))
            .ok_or(RosterError::UserNotFound)?;

        if self.store.get(&user.id).await?.is_some() {
            return Err(RosterError::AlreadyAdmin);
        }

        match self.store.insert(&user.id).await {
            Ok(()) => {}
            Err(StoreError::Conflict) => return Err(RosterError::AlreadyAdmin),
            Err(e) => return Err(e.into()),
        }

        tracing::info!(user_id = %user.id, email = %email, "admin added to roster");
        Ok(AdminRosterEntry::new(user.id))
    }

    /// Revoke admin privileges for a user id.
    ///
    /// Removing an id that is not on the roster succeeds: the desired end
    /// state ("not an admin") holds either way.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Store`] if the delete operation fails.
    pub async fn remove_admin(&self, user_id: &UserId) -> Result<(), RosterError> {
        self.store.delete(user_id).await?;
        tracing::info!(user_id = %user_id, "admin removed from roster");
        Ok(())
    }

    /// List the roster joined with provider emails.
    ///
    /// An empty roster short-circuits without contacting the Identity
    /// Provider. Otherwise the full user listing is fetched once and joined
    /// in memory; ids with no surviving user record get
    /// [`UNKNOWN_USER_LABEL`] instead of being omitted. Output follows
    /// roster id order; consumers may re-sort for presentation.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Store`] or [`RosterError::Identity`] if
    /// either listing fails.
    pub async fn list_admins(&self) -> Result<Vec<AdminUserView>, RosterError> {
        let ids = self.store.ids().await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = self.identity.list_users().await?;
        let emails: std::collections::HashMap<&UserId, &str> = users
            .iter()
            .filter_map(|u| u.email.as_deref().map(|email| (&u.id, email)))
            .collect();

        Ok(ids
            .into_iter()
            .map(|id| {
                let email = emails
                    .get(&id)
                    .map_or(UNKNOWN_USER_LABEL, |email| *email)
                    .to_owned();
                AdminUserView { id, email }
            })
            .collect())
    }
}
