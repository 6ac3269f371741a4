//! Row Store client for the admin roster table.
//!
//! The Row Store is the hosted table-CRUD service backing the roster. This
//! module defines the [`RosterStore`] trait consumed by the roster service
//! plus the production [`RestRosterStore`] speaking a PostgREST-compatible
//! HTTP API against the single logical table (`admin_users`, schema `{id}`).
//!
//! Uniqueness of roster ids is enforced here - by the table's primary key
//! constraint, surfaced as [`StoreError::Conflict`] - not by callers'
//! pre-insert checks (those lose races).

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde_json::json;
use thiserror::Error;

use velvet_plum_core::UserId;

use crate::config::BackendConfig;
use crate::models::AdminRosterEntry;

/// Errors that can occur when talking to the Row Store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("row store API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Unique constraint violation on insert.
    #[error("row already exists")]
    Conflict,

    /// Failed to parse a response body or header.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Surface of the Row Store consumed by the roster service.
#[allow(async_fn_in_trait)]
pub trait RosterStore {
    /// Fetch all roster ids.
    async fn ids(&self) -> Result<Vec<UserId>, StoreError>;

    /// Count roster rows matching an id (0 or 1 given the constraint).
    async fn count(&self, id: &UserId) -> Result<u64, StoreError>;

    /// Fetch the roster entry for an id, if present.
    async fn get(&self, id: &UserId) -> Result<Option<AdminRosterEntry>, StoreError>;

    /// Insert a roster entry.
    ///
    /// Fails with [`StoreError::Conflict`] if the id is already present.
    async fn insert(&self, id: &UserId) -> Result<(), StoreError>;

    /// Delete the roster entry for an id.
    ///
    /// Deleting an absent id succeeds: the end state is the same.
    async fn delete(&self, id: &UserId) -> Result<(), StoreError>;
}

/// Production Row Store client.
#[derive(Clone)]
pub struct RestRosterStore {
    inner: Arc<RestRosterStoreInner>,
}

struct RestRosterStoreInner {
    client: reqwest::Client,
    table_url: String,
}

impl RestRosterStore {
    /// Create a new Row Store client for the configured roster table.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the service
    /// key is not a valid header value.
    pub fn new(config: &BackendConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();

        let key = config.service_key.expose_secret();
        let mut api_key = HeaderValue::from_str(key)
            .map_err(|e| StoreError::Parse(format!("invalid service key format: {e}")))?;
        api_key.set_sensitive(true);
        headers.insert("apikey", api_key);

        let mut bearer = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|e| StoreError::Parse(format!("invalid service key format: {e}")))?;
        bearer.set_sensitive(true);
        headers.insert("Authorization", bearer);

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            inner: Arc::new(RestRosterStoreInner {
                client,
                table_url: config.endpoint(&format!("/rest/v1/{}", config.roster_table)),
            }),
        })
    }

    fn id_filter(id: &UserId) -> [(&'static str, String); 2] {
        [("id", format!("eq.{}", id.as_str())), ("select", "id".to_string())]
    }

    /// Turn an error response into a [`StoreError`].
    async fn handle_error(response: reqwest::Response) -> StoreError {
        let status = response.status();
        if status == reqwest::StatusCode::CONFLICT {
            return StoreError::Conflict;
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        StoreError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

impl RosterStore for RestRosterStore {
    async fn ids(&self) -> Result<Vec<UserId>, StoreError> {
        let response = self
            .inner
            .client
            .get(&self.inner.table_url)
            .query(&[("select", "id")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::handle_error(response).await);
        }

        let rows: Vec<AdminRosterEntry> = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        Ok(rows.into_iter().map(|row| row.id).collect())
    }

    async fn count(&self, id: &UserId) -> Result<u64, StoreError> {
        // HEAD with Prefer: count=exact; the count comes back in the
        // Content-Range header ("0-0/1" or "*/0").
        let response = self
            .inner
            .client
            .head(&self.inner.table_url)
            .query(&Self::id_filter(id))
            .header("Prefer", "count=exact")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::handle_error(response).await);
        }

        let range = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| StoreError::Parse("missing Content-Range header".to_string()))?;

        let total = range
            .rsplit('/')
            .next()
            .and_then(|t| t.parse::<u64>().ok())
            .ok_or_else(|| StoreError::Parse(format!("unparseable Content-Range: {range}")))?;

        Ok(total)
    }

    async fn get(&self, id: &UserId) -> Result<Option<AdminRosterEntry>, StoreError> {
        let response = self
            .inner
            .client
            .get(&self.inner.table_url)
            .query(&Self::id_filter(id))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::handle_error(response).await);
        }

        let mut rows: Vec<AdminRosterEntry> = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        Ok(rows.pop())
    }

    async fn insert(&self, id: &UserId) -> Result<(), StoreError> {
        let response = self
            .inner
            .client
            .post(&self.inner.table_url)
            .header("Prefer", "return=minimal")
            .json(&json!({ "id": id.as_str() }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::handle_error(response).await);
        }

        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), StoreError> {
        let response = self
            .inner
            .client
            .delete(&self.inner.table_url)
            .query(&[("id", format!("eq.{}", id.as_str()))])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::handle_error(response).await);
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_id_filter_shape() {
        let id = UserId::new("abc-123");
        let filter = RestRosterStore::id_filter(&id);
        assert_eq!(filter[0], ("id", "eq.abc-123".to_string()));
        assert_eq!(filter[1], ("select", "id".to_string()));
    }

    #[test]
    fn test_roster_entry_row_shape() {
        // PostgREST returns selected rows as an array of objects.
        let rows: Vec<AdminRosterEntry> =
            serde_json::from_str(r#"[{"id":"u-1"},{"id":"u-2"}]"#).unwrap();
        let ids: Vec<UserId> = rows.into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![UserId::new("u-1"), UserId::new("u-2")]);
    }
}
