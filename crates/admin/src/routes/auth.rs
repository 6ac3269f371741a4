//! Authentication route handlers.
//!
//! Thin pass-through to the Identity Provider: the provider owns
//! credentials, sessions, and password resets. On sign-in we keep the
//! provider session in our cookie session so the roster guard can identify
//! the caller; no admin check happens here (signing in and being an admin
//! are separate questions).

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use velvet_plum_core::{Email, UserId};

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::identity::IdentityProvider;
use crate::middleware::auth::{clear_current_user, set_current_user};
use crate::models::{CurrentUser, session_keys};
use crate::state::AppState;

/// Sign-in form body.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Sign-in response: who is now signed in.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: UserId,
    pub email: Email,
}

/// Password sign-in handler.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Json<LoginResponse>, AppError> {
    let email = Email::parse(form.email.trim())
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let auth = state
        .identity()
        .sign_in(email.as_str(), &form.password)
        .await?;

    let user = CurrentUser {
        id: auth.user.id,
        email: email.clone(),
        access_token: auth.access_token,
    };

    set_current_user(&session, &user)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;
    set_sentry_user(user.id.as_str(), Some(email.as_str()));

    tracing::info!(user_id = %user.id, "user signed in");
    Ok(Json(LoginResponse {
        id: user.id,
        email,
    }))
}

/// Sign-out handler.
///
/// Revokes the provider token best-effort; the cookie session is cleared
/// regardless, so a failed revocation never keeps the caller signed in.
#[instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
) -> Result<StatusCode, AppError> {
    if let Ok(Some(user)) = session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
    {
        if let Err(e) = state.identity().sign_out(&user.access_token).await {
            tracing::warn!(user_id = %user.id, "token revocation failed: {e}");
        }
    }

    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session clear failed: {e}")))?;
    clear_sentry_user();

    Ok(StatusCode::NO_CONTENT)
}

/// Password reset request body.
#[derive(Debug, Deserialize)]
pub struct RecoverForm {
    pub email: String,
}

/// Password reset request handler.
///
/// Always answers 202 for well-formed emails; whether the address exists
/// is the provider's secret to keep.
#[instrument(skip_all)]
pub async fn recover(
    State(state): State<AppState>,
    Form(form): Form<RecoverForm>,
) -> Result<StatusCode, AppError> {
    let email = Email::parse(form.email.trim())
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    state.identity().request_password_reset(email.as_str()).await?;

    Ok(StatusCode::ACCEPTED)
}
