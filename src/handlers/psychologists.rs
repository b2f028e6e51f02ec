use crate::{
    AppState,
    auth::AuthUser,
    error::ApiError,
    models::{CreatePsychologistRequest, Psychologist, UpdatePsychologistRequest},
    scheduling::{self, Slot},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

/// PsychologistFilter
///
/// Directory filters: specialization substring and availability weekday.
#[derive(Debug, Deserialize, IntoParams)]
pub struct PsychologistFilter {
    pub specialization: Option<String>,
    /// Day-of-week name, e.g. "Monday".
    pub availability: Option<String>,
}

/// SlotQuery
#[derive(Debug, Deserialize, IntoParams)]
pub struct SlotQuery {
    /// Calendar day, ISO format (YYYY-MM-DD).
    pub date: NaiveDate,
}

/// get_psychologists
///
/// [Public Route] Active clinician directory, alphabetical, with optional
/// specialization and availability-day filters.
#[utoipa::path(
    get,
    path = "/psychologists",
    params(PsychologistFilter),
    responses((status = 200, description = "Active psychologists", body = [Psychologist]))
)]
pub async fn get_psychologists(
    State(state): State<AppState>,
    Query(filter): Query<PsychologistFilter>,
) -> Result<Json<Vec<Psychologist>>, ApiError> {
    let psychologists = state
        .repo
        .list_public_psychologists(filter.specialization, filter.availability)
        .await?;
    Ok(Json(psychologists))
}

/// get_featured_psychologists
///
/// [Public Route] Homepage shortlist, newest profiles first.
#[utoipa::path(
    get,
    path = "/psychologists/featured",
    params(super::LimitQuery),
    responses((status = 200, description = "Featured psychologists", body = [Psychologist]))
)]
pub async fn get_featured_psychologists(
    State(state): State<AppState>,
    Query(q): Query<super::LimitQuery>,
) -> Result<Json<Vec<Psychologist>>, ApiError> {
    let limit = q.limit.unwrap_or(3).clamp(1, 12);
    Ok(Json(state.repo.shortlist_psychologists(limit).await?))
}

/// get_available_slots
///
/// [Public Route] Open hourly slots (9:00–17:00) for a psychologist on one
/// calendar day. Only PENDING and CONFIRMED appointments block a slot;
/// cancelled and completed ones free it up again. A day with no bookings
/// yields exactly eight slots.
#[utoipa::path(
    get,
    path = "/psychologists/{id}/slots",
    params(("id" = Uuid, Path, description = "Psychologist ID"), SlotQuery),
    responses(
        (status = 200, description = "Open slots", body = [Slot]),
        (status = 404, description = "Unknown psychologist")
    )
)]
pub async fn get_available_slots(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(q): Query<SlotQuery>,
) -> Result<Json<Vec<Slot>>, ApiError> {
    state
        .repo
        .get_psychologist(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let (from, to) = scheduling::day_bounds(q.date);
    let booked = state.repo.blocking_appointments(id, from, to).await?;

    Ok(Json(scheduling::available_slots(q.date, &booked)))
}

/// get_admin_psychologists
///
/// [Admin Route] All profiles, active or not.
#[utoipa::path(
    get,
    path = "/admin/psychologists",
    responses((status = 200, description = "All psychologists", body = [Psychologist]))
)]
pub async fn get_admin_psychologists(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Psychologist>>, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    Ok(Json(state.repo.list_psychologists_admin().await?))
}

/// create_psychologist
///
/// [Admin Route]
#[utoipa::path(
    post,
    path = "/admin/psychologists",
    request_body = CreatePsychologistRequest,
    responses((status = 201, description = "Created", body = Psychologist))
)]
pub async fn create_psychologist(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreatePsychologistRequest>,
) -> Result<(StatusCode, Json<Psychologist>), ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    let psychologist = state.repo.create_psychologist(payload).await?;
    Ok((StatusCode::CREATED, Json(psychologist)))
}

/// update_psychologist
///
/// [Admin Route] Partial update; only provided fields change.
#[utoipa::path(
    put,
    path = "/admin/psychologists/{id}",
    params(("id" = Uuid, Path, description = "Psychologist ID")),
    request_body = UpdatePsychologistRequest,
    responses((status = 200, description = "Updated", body = Psychologist))
)]
pub async fn update_psychologist(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePsychologistRequest>,
) -> Result<Json<Psychologist>, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    let psychologist = state
        .repo
        .update_psychologist(id, payload)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(psychologist))
}

/// delete_psychologist
///
/// [Admin Route] Removes the profile. Past appointments survive with a null
/// psychologist reference; nothing cascades.
#[utoipa::path(
    delete,
    path = "/admin/psychologists/{id}",
    params(("id" = Uuid, Path, description = "Psychologist ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_psychologist(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    if state.repo.delete_psychologist(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
