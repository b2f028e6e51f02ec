use crate::{
    AppState,
    auth::AuthUser,
    error::ApiError,
    models::{
        CreateDonationRequest, Donation, DonationStats, Page, UpdateDonationStatusRequest,
        clamp_limit,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

/// CursorQuery
///
/// Plain limit+cursor pagination with no extra filters.
#[derive(Debug, Deserialize, IntoParams)]
pub struct CursorQuery {
    pub limit: Option<i64>,
    pub cursor: Option<Uuid>,
}

/// create_donation
///
/// [Public Route] Records a donation as PENDING. When the donor happens to be
/// signed in, the row is linked to their account; anonymous donors just leave
/// their name/email. Settlement is recorded later via the admin status
/// endpoint — there is no gateway round-trip here.
#[utoipa::path(
    post,
    path = "/donations",
    request_body = CreateDonationRequest,
    responses((status = 201, description = "Recorded", body = Donation))
)]
pub async fn create_donation(
    user: Option<AuthUser>,
    State(state): State<AppState>,
    Json(payload): Json<CreateDonationRequest>,
) -> Result<(StatusCode, Json<Donation>), ApiError> {
    if payload.amount < 1.0 {
        return Err(ApiError::BadRequest(
            "Donation amount must be at least 1".to_string(),
        ));
    }
    let donation = state
        .repo
        .create_donation(user.map(|u| u.id), payload)
        .await?;
    Ok((StatusCode::CREATED, Json(donation)))
}

/// get_donation_details
///
/// [Public Route] Lookup by id — the donate-success page polls this.
#[utoipa::path(
    get,
    path = "/donations/{id}",
    params(("id" = Uuid, Path, description = "Donation ID")),
    responses((status = 200, description = "Found", body = Donation))
)]
pub async fn get_donation_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Donation>, ApiError> {
    let donation = state.repo.get_donation(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(donation))
}

/// get_my_donations
///
/// [Authenticated Route] The caller's donation history, newest first.
#[utoipa::path(
    get,
    path = "/me/donations",
    params(CursorQuery),
    responses((status = 200, description = "Paginated donations"))
)]
pub async fn get_my_donations(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
    Query(q): Query<CursorQuery>,
) -> Result<Json<Page<Donation>>, ApiError> {
    let limit = clamp_limit(q.limit, 10);
    let rows = state.repo.my_donations(id, limit, q.cursor).await?;
    Ok(Json(Page::from_rows(rows, limit, |d| d.id)))
}

/// get_admin_donations
///
/// [Admin Route] Recent donations with the donor account joined in.
#[utoipa::path(
    get,
    path = "/admin/donations",
    params(CursorQuery),
    responses((status = 200, description = "Paginated donations"))
)]
pub async fn get_admin_donations(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Query(q): Query<CursorQuery>,
) -> Result<Json<Page<Donation>>, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    let limit = clamp_limit(q.limit, 10);
    let rows = state.repo.recent_donations(limit, q.cursor).await?;
    Ok(Json(Page::from_rows(rows, limit, |d| d.id)))
}

/// update_donation_status
///
/// [Admin Route] Marks a donation settled/failed/refunded and records the
/// external transaction reference. No transition rules, per the data model.
#[utoipa::path(
    put,
    path = "/admin/donations/{id}/status",
    params(("id" = Uuid, Path, description = "Donation ID")),
    request_body = UpdateDonationStatusRequest,
    responses((status = 200, description = "Updated", body = Donation))
)]
pub async fn update_donation_status(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDonationStatusRequest>,
) -> Result<Json<Donation>, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    let donation = state
        .repo
        .update_donation_status(id, payload)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(donation))
}

/// get_donation_stats
///
/// [Admin Route] Dashboard counters; the amount total covers COMPLETED only.
#[utoipa::path(
    get,
    path = "/admin/donations/stats",
    responses((status = 200, description = "Stats", body = DonationStats))
)]
pub async fn get_donation_stats(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<DonationStats>, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    Ok(Json(state.repo.donation_stats().await?))
}
