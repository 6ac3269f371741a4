//! Admin roster management commands.
//!
//! # Usage
//!
//! ```bash
//! vp-cli admin list
//! vp-cli admin add -e admin@example.com
//! vp-cli admin remove -i <user-id>
//! ```
//!
//! # Environment Variables
//!
//! - `BACKEND_URL` - Base URL of the hosted backend
//! - `BACKEND_SERVICE_KEY` - Backend service-role key

use thiserror::Error;

use velvet_plum_admin::config::{BackendConfig, ConfigError};
use velvet_plum_admin::identity::{IdentityError, RestIdentityClient};
use velvet_plum_admin::services::roster::{AdminRosterService, RosterError};
use velvet_plum_admin::store::{RestRosterStore, StoreError};
use velvet_plum_core::UserId;

/// Errors that can occur during admin roster commands.
#[derive(Debug, Error)]
pub enum AdminCmdError {
    /// Backend configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Row store client could not be built.
    #[error("Row store error: {0}")]
    Store(#[from] StoreError),

    /// Identity client could not be built.
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Roster operation failed.
    #[error("{0}")]
    Roster(#[from] RosterError),
}

/// Build the roster service from environment configuration.
fn service() -> Result<AdminRosterService<RestRosterStore, RestIdentityClient>, AdminCmdError> {
    dotenvy::dotenv().ok();

    let backend = BackendConfig::from_env()?;
    let store = RestRosterStore::new(&backend)?;
    let identity = RestIdentityClient::new(&backend)?;

    Ok(AdminRosterService::new(store, identity))
}

/// List the admin roster with emails.
pub async fn list() -> Result<(), AdminCmdError> {
    let roster = service()?;

    let admins = roster.list_admins().await?;
    if admins.is_empty() {
        tracing::info!("Admin roster is empty");
        return Ok(());
    }

    tracing::info!("Admin roster ({} members):", admins.len());
    for admin in admins {
        tracing::info!("  {}  {}", admin.id, admin.email);
    }

    Ok(())
}

/// Grant admin privileges to the user with this email.
///
/// # Returns
///
/// The user id added to the roster.
pub async fn add(email: &str) -> Result<UserId, AdminCmdError> {
    let roster = service()?;

    tracing::info!("Granting admin privileges to: {email}");
    let entry = roster.add_admin(email).await?;
    tracing::info!("Admin added. User id: {}", entry.id);

    Ok(entry.id)
}

/// Revoke admin privileges for a user id.
pub async fn remove(id: &str) -> Result<(), AdminCmdError> {
    let roster = service()?;

    tracing::info!("Revoking admin privileges for: {id}");
    roster.remove_admin(&UserId::new(id)).await?;
    tracing::info!("Admin removed (no-op if the id was not on the roster)");

    Ok(())
}
