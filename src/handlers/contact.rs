use crate::{
    AppState,
    auth::AuthUser,
    error::ApiError,
    models::{
        ContactStats, ContactStatus, ContactSubmission, Page, SubmitContactRequest,
        UpdateContactStatusRequest, clamp_limit,
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

/// ContactFilter
#[derive(Debug, Deserialize, IntoParams)]
pub struct ContactFilter {
    pub limit: Option<i64>,
    pub cursor: Option<Uuid>,
    pub status: Option<ContactStatus>,
    pub search: Option<String>,
}

/// submit_contact
///
/// [Public Route] Contact-form submission; lands in the admin inbox as NEW.
#[utoipa::path(
    post,
    path = "/contact",
    request_body = SubmitContactRequest,
    responses((status = 201, description = "Submitted", body = ContactSubmission))
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(payload): Json<SubmitContactRequest>,
) -> Result<(StatusCode, Json<ContactSubmission>), ApiError> {
    if payload.message.len() < 10 {
        return Err(ApiError::BadRequest(
            "Message must be at least 10 characters".to_string(),
        ));
    }
    let submission = state.repo.submit_contact(payload).await?;
    Ok((StatusCode::CREATED, Json(submission)))
}

/// get_admin_contact_submissions
///
/// [Admin Route] Inbox, newest first, with status and free-text filters.
#[utoipa::path(
    get,
    path = "/admin/contact",
    params(ContactFilter),
    responses((status = 200, description = "Paginated submissions"))
)]
pub async fn get_admin_contact_submissions(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<ContactFilter>,
) -> Result<Json<Page<ContactSubmission>>, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    let limit = clamp_limit(filter.limit, 10);
    let rows = state
        .repo
        .list_contact_submissions(limit, filter.cursor, filter.status, filter.search)
        .await?;
    Ok(Json(Page::from_rows(rows, limit, |c| c.id)))
}

/// get_contact_submission_details
///
/// [Admin Route]
#[utoipa::path(
    get,
    path = "/admin/contact/{id}",
    params(("id" = Uuid, Path, description = "Submission ID")),
    responses((status = 200, description = "Found", body = ContactSubmission))
)]
pub async fn get_contact_submission_details(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContactSubmission>, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    let submission = state
        .repo
        .get_contact_submission(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(submission))
}

/// update_contact_status
///
/// [Admin Route] Moves a submission through the triage states and records
/// the written response.
#[utoipa::path(
    put,
    path = "/admin/contact/{id}/status",
    params(("id" = Uuid, Path, description = "Submission ID")),
    request_body = UpdateContactStatusRequest,
    responses((status = 200, description = "Updated", body = ContactSubmission))
)]
pub async fn update_contact_status(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContactStatusRequest>,
) -> Result<Json<ContactSubmission>, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    let submission = state
        .repo
        .update_contact_status(id, payload)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(submission))
}

/// get_contact_stats
///
/// [Admin Route] Inbox counters per triage state.
#[utoipa::path(
    get,
    path = "/admin/contact/stats",
    responses((status = 200, description = "Stats", body = ContactStats))
)]
pub async fn get_contact_stats(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ContactStats>, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    Ok(Json(state.repo.contact_stats().await?))
}
