use crate::{AppState, auth::AuthUser, error::ApiError, models::AdminDashboardStats};
use axum::{Json, extract::State};

/// get_admin_stats
///
/// [Admin Route] Entity counters for the dashboard landing page.
#[utoipa::path(
    get,
    path = "/admin/stats",
    responses((status = 200, description = "Stats", body = AdminDashboardStats))
)]
pub async fn get_admin_stats(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<AdminDashboardStats>, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    Ok(Json(state.repo.admin_stats().await?))
}
