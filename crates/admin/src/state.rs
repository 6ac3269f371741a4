//! Application state shared across handlers.

use std::sync::Arc;

use crate::{
    config::AdminConfig,
    identity::RestIdentityClient,
    services::roster::AdminRosterService,
    store::RestRosterStore,
};

/// Roster service type wired with the production collaborators.
pub type Roster = AdminRosterService<RestRosterStore, RestIdentityClient>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    roster: Roster,
    identity: RestIdentityClient,
}

impl AppState {
    /// Build application state from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error message if either backend client fails to build
    /// (malformed service key, HTTP client construction failure).
    pub fn new(config: AdminConfig) -> Result<Self, String> {
        let store = RestRosterStore::new(config.backend())
            .map_err(|e| format!("failed to build row store client: {e}"))?;
        let identity = RestIdentityClient::new(config.backend())
            .map_err(|e| format!("failed to build identity client: {e}"))?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                roster: AdminRosterService::new(store, identity.clone()),
                identity,
                config,
            }),
        })
    }

    /// Returns the application configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Returns the roster service.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.inner.roster
    }

    /// Returns the Identity Provider client.
    #[must_use]
    pub fn identity(&self) -> &RestIdentityClient {
        &self.inner.identity
    }
}
