use crate::{
    AppState,
    auth::AuthUser,
    error::ApiError,
    models::{
        Appointment, AppointmentStatus, BookAppointmentRequest, Page, UpdateAppointmentRequest,
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

/// AppointmentFilter
#[derive(Debug, Deserialize, IntoParams)]
pub struct AppointmentFilter {
    pub limit: Option<i64>,
    pub cursor: Option<Uuid>,
    pub status: Option<AppointmentStatus>,
}

/// get_my_appointments
///
/// [Authenticated Route] The caller's appointments, newest first, with an
/// optional status filter and cursor pagination. Each row carries the
/// psychologist summary for display.
#[utoipa::path(
    get,
    path = "/me/appointments",
    params(AppointmentFilter),
    responses((status = 200, description = "Paginated appointments"))
)]
pub async fn get_my_appointments(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<AppointmentFilter>,
) -> Result<Json<Page<Appointment>>, ApiError> {
    let limit = clamp_limit(filter.limit, 10);
    let rows = state
        .repo
        .my_appointments(id, limit, filter.cursor, filter.status)
        .await?;
    Ok(Json(Page::from_rows(rows, limit, |a| a.id)))
}

/// book_appointment
///
/// [Authenticated Route] Books a slot with a psychologist.
///
/// The insert races only against the database's active-slot unique index:
/// whoever commits first owns the slot, and every other attempt — sequential
/// or concurrent — gets a 409. There is no pre-check to race against.
#[utoipa::path(
    post,
    path = "/appointments",
    request_body = BookAppointmentRequest,
    responses(
        (status = 201, description = "Booked", body = Appointment),
        (status = 404, description = "Unknown psychologist"),
        (status = 409, description = "Slot already booked")
    )
)]
pub async fn book_appointment(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    state
        .repo
        .get_psychologist(payload.psychologist_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let appointment = state
        .repo
        .book_appointment(user_id, payload)
        .await?
        .ok_or_else(|| ApiError::Conflict("Time slot is already booked".to_string()))?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

/// cancel_appointment
///
/// [Authenticated Route] Cancels the caller's own appointment. A foreign or
/// missing appointment is indistinguishable to the caller (404); cancelling
/// twice is a 400.
#[utoipa::path(
    post,
    path = "/appointments/{id}/cancel",
    params(("id" = Uuid, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Cancelled", body = Appointment),
        (status = 400, description = "Already cancelled"),
        (status = 404, description = "Not Found or Not Yours")
    )
)]
pub async fn cancel_appointment(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, ApiError> {
    let appointment = state
        .repo
        .get_appointment(id)
        .await?
        .filter(|a| a.user_id == user_id)
        .ok_or(ApiError::NotFound)?;

    if appointment.status == AppointmentStatus::Cancelled {
        return Err(ApiError::BadRequest(
            "Appointment is already cancelled".to_string(),
        ));
    }

    let cancelled = state
        .repo
        .set_appointment_status(id, AppointmentStatus::Cancelled)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(cancelled))
}

/// update_appointment
///
/// [Staff Route] Sets status / notes / meeting link on any appointment.
/// Restricted to ADMIN and PSYCHOLOGIST roles. Any status can be set to any
/// other; there is no transition validation.
#[utoipa::path(
    patch,
    path = "/appointments/{id}",
    params(("id" = Uuid, Path, description = "Appointment ID")),
    request_body = UpdateAppointmentRequest,
    responses(
        (status = 200, description = "Updated", body = Appointment),
        (status = 403, description = "Not staff")
    )
)]
pub async fn update_appointment(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentRequest>,
) -> Result<Json<Appointment>, ApiError> {
    if role != "ADMIN" && role != "PSYCHOLOGIST" {
        return Err(ApiError::Forbidden);
    }
    let appointment = state
        .repo
        .update_appointment(id, payload)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(appointment))
}

/// get_admin_appointments
///
/// [Admin Route] Every appointment in the system with both parties joined in.
#[utoipa::path(
    get,
    path = "/admin/appointments",
    responses((status = 200, description = "All appointments", body = [Appointment]))
)]
pub async fn get_admin_appointments(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    Ok(Json(state.repo.list_appointments_admin().await?))
}
