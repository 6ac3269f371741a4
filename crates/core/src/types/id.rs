//! Opaque user identifier type.
//!
//! Identity Provider user ids are opaque strings (UUIDs in practice, but the
//! provider makes no such guarantee), so `UserId` wraps a `String` rather
//! than an integer. The wrapper prevents accidentally mixing user ids with
//! other stringly-typed values such as emails or access tokens.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A user id issued by the Identity Provider.
///
/// Treated as an opaque token: never parsed, only compared and forwarded.
/// An empty id is representable (callers may hand us one straight from an
/// absent session) and is rejected at the authorization boundary instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a new user id from its string form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the id is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
