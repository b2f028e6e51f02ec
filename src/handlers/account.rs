use crate::{
    AppState,
    auth::AuthUser,
    error::ApiError,
    models::{UpdateProfileRequest, User},
};
use axum::{Json, extract::State};

/// get_me
///
/// [Authenticated Route] The caller's own user row, as synced from the
/// identity provider. The extractor already proved the row exists; a vanish
/// between extraction and fetch reads as a revoked session.
#[utoipa::path(
    get,
    path = "/me",
    responses((status = 200, description = "Profile", body = User))
)]
pub async fn get_me(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .repo
        .get_user(id)
        .await?
        .ok_or(ApiError::Unauthorized)?;
    Ok(Json(user))
}

/// update_me
///
/// [Authenticated Route] Self-service name/avatar edits. Email and role are
/// owned by the identity provider and the admin respectively, and are not
/// editable here.
#[utoipa::path(
    patch,
    path = "/me",
    request_body = UpdateProfileRequest,
    responses((status = 200, description = "Updated", body = User))
)]
pub async fn update_me(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .repo
        .update_profile(id, payload)
        .await?
        .ok_or(ApiError::Unauthorized)?;
    Ok(Json(user))
}

/// is_admin
///
/// [Authenticated Route] Convenience flag for the client's admin gate. The
/// server-side checks in every admin handler are the real enforcement.
#[utoipa::path(
    get,
    path = "/me/is-admin",
    responses((status = 200, description = "Whether the caller is an admin", body = bool))
)]
pub async fn is_admin(AuthUser { role, .. }: AuthUser) -> Json<bool> {
    Json(role == "ADMIN")
}
