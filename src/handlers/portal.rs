use crate::{
    AppState,
    auth::AuthUser,
    error::ApiError,
    models::{
        Appointment, AppointmentStatus, Psychologist, PsychologistDashboardStats,
        UpdateAppointmentRequest, UpdatePsychologistRequest,
    },
    repository::RepositoryState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

/// PortalAppointmentFilter
///
/// Filters for the psychologist's own appointment list.
#[derive(Debug, Deserialize, IntoParams)]
pub struct PortalAppointmentFilter {
    pub status: Option<AppointmentStatus>,
    #[param(value_type = Option<String>)]
    pub date_from: Option<DateTime<Utc>>,
    #[param(value_type = Option<String>)]
    pub date_to: Option<DateTime<Utc>>,
}

/// Resolves the caller to their psychologist profile, enforcing the portal's
/// role gate on the way. Every portal handler starts here.
async fn require_profile(user: &AuthUser, repo: &RepositoryState) -> Result<Psychologist, ApiError> {
    if user.role != "PSYCHOLOGIST" {
        return Err(ApiError::Forbidden);
    }
    repo.get_psychologist_by_user(user.id)
        .await?
        .ok_or(ApiError::NotFound)
}

/// get_portal_stats
///
/// [Psychologist Route] Landing-page counters: appointments today, this week
/// (Sunday-based) and overall.
#[utoipa::path(
    get,
    path = "/psychologist/stats",
    responses((status = 200, description = "Stats", body = PsychologistDashboardStats))
)]
pub async fn get_portal_stats(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<PsychologistDashboardStats>, ApiError> {
    let profile = require_profile(&user, &state.repo).await?;

    let now = Utc::now();
    let today_start = Utc
        .from_utc_datetime(&now.date_naive().and_hms_opt(0, 0, 0).expect("midnight"));
    let today = (today_start, today_start + Duration::days(1));

    let week_start = today_start - Duration::days(now.weekday().num_days_from_sunday() as i64);
    let week = (week_start, week_start + Duration::days(7));

    let stats = state.repo.psychologist_stats(profile.id, today, week).await?;
    Ok(Json(stats))
}

/// get_portal_appointments
///
/// [Psychologist Route] The caller's full appointment list, newest first,
/// with status and date-range filters. Rows carry the patient summary.
#[utoipa::path(
    get,
    path = "/psychologist/appointments",
    params(PortalAppointmentFilter),
    responses((status = 200, description = "Appointments", body = [Appointment]))
)]
pub async fn get_portal_appointments(
    user: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<PortalAppointmentFilter>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let profile = require_profile(&user, &state.repo).await?;
    let appointments = state
        .repo
        .appointments_for_psychologist(profile.id, filter.status, filter.date_from, filter.date_to)
        .await?;
    Ok(Json(appointments))
}

/// get_recent_portal_appointments
///
/// [Psychologist Route] Dashboard shortlist of the most recent appointments.
#[utoipa::path(
    get,
    path = "/psychologist/appointments/recent",
    params(super::LimitQuery),
    responses((status = 200, description = "Recent appointments", body = [Appointment]))
)]
pub async fn get_recent_portal_appointments(
    user: AuthUser,
    State(state): State<AppState>,
    Query(q): Query<super::LimitQuery>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let profile = require_profile(&user, &state.repo).await?;
    let limit = q.limit.unwrap_or(5).clamp(1, 100);
    Ok(Json(state.repo.recent_appointments(profile.id, limit).await?))
}

/// update_portal_appointment
///
/// [Psychologist Route] Status/notes update for one of the caller's own
/// appointments. The ownership check runs against the caller's profile, so
/// another psychologist's appointment is a 404 here, not a 403 — the row's
/// existence is not disclosed.
#[utoipa::path(
    put,
    path = "/psychologist/appointments/{id}/status",
    params(("id" = Uuid, Path, description = "Appointment ID")),
    request_body = UpdateAppointmentRequest,
    responses(
        (status = 200, description = "Updated", body = Appointment),
        (status = 404, description = "Not Found or Not Yours")
    )
)]
pub async fn update_portal_appointment(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentRequest>,
) -> Result<Json<Appointment>, ApiError> {
    let profile = require_profile(&user, &state.repo).await?;

    state
        .repo
        .get_psychologist_appointment(id, profile.id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let updated = state
        .repo
        .update_appointment(id, payload)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(updated))
}

/// get_portal_profile
///
/// [Psychologist Route] The caller's own clinician profile.
#[utoipa::path(
    get,
    path = "/psychologist/profile",
    responses((status = 200, description = "Profile", body = Psychologist))
)]
pub async fn get_portal_profile(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Psychologist>, ApiError> {
    let profile = require_profile(&user, &state.repo).await?;
    Ok(Json(profile))
}

/// update_portal_profile
///
/// [Psychologist Route] Self-service profile edits (bio, availability,
/// active flag, ...). Same payload as the admin endpoint, scoped to self.
#[utoipa::path(
    put,
    path = "/psychologist/profile",
    request_body = UpdatePsychologistRequest,
    responses((status = 200, description = "Updated", body = Psychologist))
)]
pub async fn update_portal_profile(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<UpdatePsychologistRequest>,
) -> Result<Json<Psychologist>, ApiError> {
    let profile = require_profile(&user, &state.repo).await?;
    let updated = state
        .repo
        .update_psychologist(profile.id, payload)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(updated))
}
