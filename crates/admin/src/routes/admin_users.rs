//! Admin roster management route handlers.
//!
//! All three handlers sit behind [`RequireAdminAuth`], so only existing
//! admins can read or mutate the roster.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Form, Json};
use serde::Deserialize;
use tracing::instrument;

use velvet_plum_core::UserId;

use crate::error::AppError;
use crate::middleware::RequireAdminAuth;
use crate::models::{AdminRosterEntry, AdminUserView};
use crate::state::AppState;

/// List the admin roster joined with provider emails.
#[instrument(skip(state))]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminUserView>>, AppError> {
    let admins = state.roster().list_admins().await?;
    Ok(Json(admins))
}

/// Grant form body.
#[derive(Debug, Deserialize)]
pub struct AddAdminForm {
    pub email: String,
}

/// Grant admin privileges to the user with this email.
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<AddAdminForm>,
) -> Result<(StatusCode, Json<AdminRosterEntry>), AppError> {
    let entry = state.roster().add_admin(&form.email).await?;
    tracing::info!(granted_to = %entry.id, granted_by = %admin.id, "admin granted");
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Revoke admin privileges for a user id.
///
/// Revoking an id that is not on the roster still answers 204: the end
/// state is the same.
#[instrument(skip(state))]
pub async fn remove(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = UserId::new(id);
    state.roster().remove_admin(&id).await?;
    tracing::info!(revoked = %id, revoked_by = %admin.id, "admin revoked");
    Ok(StatusCode::NO_CONTENT)
}
