//! Identity Provider client.
//!
//! The Identity Provider is the hosted authentication service that owns user
//! records and sessions. This module defines the [`IdentityProvider`] trait
//! consumed by the roster service and auth routes, plus the production
//! [`RestIdentityClient`] speaking a GoTrue-compatible HTTP API.
//!
//! # API Reference
//!
//! - `GET  /auth/v1/admin/users` - list all users (service key)
//! - `POST /auth/v1/token?grant_type=password` - password sign-in
//! - `POST /auth/v1/logout` - revoke an access token
//! - `POST /auth/v1/recover` - request a password reset email
//! - `GET  /auth/v1/user` - fetch the user behind an access token

mod types;

pub use types::{AuthSession, IdentityUser};

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde_json::json;
use thiserror::Error;

use crate::config::BackendConfig;

/// Errors that can occur when talking to the Identity Provider.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("identity API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Credentials or token were rejected.
    #[error("invalid credentials")]
    Unauthorized,

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Surface of the Identity Provider consumed by this crate.
///
/// Kept as a trait so the roster service and route guard can be exercised
/// against in-memory fakes; the session is threaded explicitly rather than
/// read from ambient provider state.
#[allow(async_fn_in_trait)]
pub trait IdentityProvider {
    /// List all registered users with their emails.
    async fn list_users(&self) -> Result<Vec<IdentityUser>, IdentityError>;

    /// Sign in with email and password, returning a provider session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, IdentityError>;

    /// Revoke an access token.
    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError>;

    /// Request a password reset email for an address.
    async fn request_password_reset(&self, email: &str) -> Result<(), IdentityError>;

    /// Fetch the user record behind an access token.
    async fn current_user(&self, access_token: &str) -> Result<IdentityUser, IdentityError>;
}

/// Production Identity Provider client.
///
/// Authenticates with the backend service key; per-user calls (`sign_out`,
/// `current_user`) override the Authorization header with the user's own
/// token.
#[derive(Clone)]
pub struct RestIdentityClient {
    inner: Arc<RestIdentityClientInner>,
}

struct RestIdentityClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl RestIdentityClient {
    /// Create a new Identity Provider client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the service
    /// key is not a valid header value.
    pub fn new(config: &BackendConfig) -> Result<Self, IdentityError> {
        let mut headers = HeaderMap::new();

        let key = config.service_key.expose_secret();
        let mut api_key = HeaderValue::from_str(key)
            .map_err(|e| IdentityError::Parse(format!("invalid service key format: {e}")))?;
        api_key.set_sensitive(true);
        headers.insert("apikey", api_key);

        let mut bearer = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|e| IdentityError::Parse(format!("invalid service key format: {e}")))?;
        bearer.set_sensitive(true);
        headers.insert("Authorization", bearer);

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            inner: Arc::new(RestIdentityClientInner {
                client,
                base_url: config.endpoint("/auth/v1"),
            }),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    /// Turn an error response into an [`IdentityError`].
    async fn handle_error(response: reqwest::Response) -> IdentityError {
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return IdentityError::Unauthorized;
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        IdentityError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

impl IdentityProvider for RestIdentityClient {
    async fn list_users(&self) -> Result<Vec<IdentityUser>, IdentityError> {
        // The provider paginates; the admin user set is small enough that a
        // single large page covers it.
        let response = self
            .inner
            .client
            .get(self.url("/admin/users"))
            .query(&[("per_page", "1000")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::handle_error(response).await);
        }

        let listing: types::UserListing = response
            .json()
            .await
            .map_err(|e| IdentityError::Parse(e.to_string()))?;

        Ok(listing.users)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, IdentityError> {
        let response = self
            .inner
            .client
            .post(self.url("/token"))
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::handle_error(response).await);
        }

        response
            .json::<AuthSession>()
            .await
            .map_err(|e| IdentityError::Parse(e.to_string()))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
        let response = self
            .inner
            .client
            .post(self.url("/logout"))
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::handle_error(response).await);
        }

        Ok(())
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), IdentityError> {
        let response = self
            .inner
            .client
            .post(self.url("/recover"))
            .json(&json!({ "email": email }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::handle_error(response).await);
        }

        Ok(())
    }

    async fn current_user(&self, access_token: &str) -> Result<IdentityUser, IdentityError> {
        let response = self
            .inner
            .client
            .get(self.url("/user"))
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::handle_error(response).await);
        }

        response
            .json::<IdentityUser>()
            .await
            .map_err(|e| IdentityError::Parse(e.to_string()))
    }
}
