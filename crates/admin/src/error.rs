//! Unified error handling for admin.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::identity::IdentityError;
use crate::services::roster::RosterError;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Roster management operation failed.
    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    /// Identity Provider operation failed.
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// User lacks permission.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this error indicates a server-side fault worth capturing.
    const fn is_server_error(&self) -> bool {
        match self {
            Self::Internal(_) => true,
            // A rejected credential is the caller's problem, not ours.
            Self::Identity(IdentityError::Unauthorized) => false,
            Self::Roster(RosterError::Identity(_) | RosterError::Store(_)) | Self::Identity(_) => {
                true
            }
            _ => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log infrastructure errors with Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        let status = match &self {
            Self::Roster(roster) => match roster {
                RosterError::InvalidEmail(_) => StatusCode::UNPROCESSABLE_ENTITY,
                RosterError::UserNotFound => StatusCode::NOT_FOUND,
                RosterError::AlreadyAdmin => StatusCode::CONFLICT,
                RosterError::Identity(_) | RosterError::Store(_) => StatusCode::BAD_GATEWAY,
            },
            Self::Identity(IdentityError::Unauthorized) => StatusCode::UNAUTHORIZED,
            Self::Identity(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose backend error details to clients
        let message = if self.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, message).into_response()
    }
}

/// Set the Sentry user context from a signed-in user.
pub fn set_sentry_user(user_id: &str, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}
