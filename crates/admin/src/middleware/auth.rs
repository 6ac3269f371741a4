//! Authentication middleware and extractors for admin.
//!
//! Provides the extractor that gates admin-only routes. The session proves
//! who the caller is; the roster check decides whether they are an admin.
//! The check runs on every request - there is no cached or fail-open path,
//! so revoking a roster entry takes effect immediately.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};
use crate::state::AppState;

/// Extractor that requires a signed-in user who is on the admin roster.
///
/// Returns 401 Unauthorized when there is no session identity, and
/// 403 Forbidden when the identity is not on the roster (including when the
/// roster lookup itself fails - access control fails closed).
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdminAuth(user): RequireAdminAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentUser);

/// Error returned when admin authorization fails.
pub enum AdminAuthRejection {
    /// No session identity.
    Unauthorized,
    /// Signed in, but not on the admin roster.
    Forbidden,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::Forbidden => {
                (StatusCode::FORBIDDEN, "Admin privileges required").into_response()
            }
        }
    }
}

impl FromRequestParts<AppState> for RequireAdminAuth {
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminAuthRejection::Unauthorized)?;

        // Get the signed-in identity from the session
        let user: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or(AdminAuthRejection::Unauthorized)?;

        // Authoritative roster check; fails closed on lookup errors
        if !state.roster().is_admin(Some(&user.id)).await {
            tracing::warn!(user_id = %user.id, "non-admin attempted admin route");
            return Err(AdminAuthRejection::Forbidden);
        }

        Ok(Self(user))
    }
}

/// Helper to set the current user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the current user from the session (sign-out).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}
