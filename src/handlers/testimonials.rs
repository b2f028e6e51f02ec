use crate::{
    AppState,
    auth::AuthUser,
    error::ApiError,
    models::{
        Page, SubmitTestimonialRequest, Testimonial, UpdateTestimonialRequest, clamp_limit,
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

/// TestimonialFilter
#[derive(Debug, Deserialize, IntoParams)]
pub struct TestimonialFilter {
    pub limit: Option<i64>,
    pub cursor: Option<Uuid>,
    pub approved: Option<bool>,
}

/// get_testimonials
///
/// [Public Route] Approved testimonials, newest first.
#[utoipa::path(
    get,
    path = "/testimonials",
    responses((status = 200, description = "Approved testimonials", body = [Testimonial]))
)]
pub async fn get_testimonials(
    State(state): State<AppState>,
) -> Result<Json<Vec<Testimonial>>, ApiError> {
    Ok(Json(state.repo.approved_testimonials().await?))
}

/// get_testimonial_details
///
/// [Public Route] Single approved testimonial; pending ones 404.
#[utoipa::path(
    get,
    path = "/testimonials/{id}",
    params(("id" = Uuid, Path, description = "Testimonial ID")),
    responses((status = 200, description = "Found", body = Testimonial))
)]
pub async fn get_testimonial_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Testimonial>, ApiError> {
    let testimonial = state
        .repo
        .get_approved_testimonial(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(testimonial))
}

/// submit_testimonial
///
/// [Public Route] New submissions always enter the moderation queue
/// unapproved, whatever the client claims.
#[utoipa::path(
    post,
    path = "/testimonials",
    request_body = SubmitTestimonialRequest,
    responses((status = 201, description = "Queued for review", body = Testimonial))
)]
pub async fn submit_testimonial(
    State(state): State<AppState>,
    Json(payload): Json<SubmitTestimonialRequest>,
) -> Result<(StatusCode, Json<Testimonial>), ApiError> {
    if let Some(rating) = payload.rating {
        if !(1..=5).contains(&rating) {
            return Err(ApiError::BadRequest(
                "Rating must be between 1 and 5".to_string(),
            ));
        }
    }
    let testimonial = state.repo.submit_testimonial(payload).await?;
    Ok((StatusCode::CREATED, Json(testimonial)))
}

/// get_admin_testimonials
///
/// [Admin Route] Moderation queue, paginated, optionally filtered to
/// approved or pending entries.
#[utoipa::path(
    get,
    path = "/admin/testimonials",
    params(TestimonialFilter),
    responses((status = 200, description = "Paginated testimonials"))
)]
pub async fn get_admin_testimonials(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<TestimonialFilter>,
) -> Result<Json<Page<Testimonial>>, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    let limit = clamp_limit(filter.limit, 10);
    let rows = state
        .repo
        .list_testimonials_admin(limit, filter.cursor, filter.approved)
        .await?;
    Ok(Json(Page::from_rows(rows, limit, |t| t.id)))
}

/// approve_testimonial
///
/// [Admin Route]
#[utoipa::path(
    post,
    path = "/admin/testimonials/{id}/approve",
    params(("id" = Uuid, Path, description = "Testimonial ID")),
    responses((status = 200, description = "Approved", body = Testimonial))
)]
pub async fn approve_testimonial(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Testimonial>, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    let testimonial = state
        .repo
        .approve_testimonial(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(testimonial))
}

/// reject_testimonial
///
/// [Admin Route] Rejection deletes the submission outright.
#[utoipa::path(
    delete,
    path = "/admin/testimonials/{id}",
    params(("id" = Uuid, Path, description = "Testimonial ID")),
    responses(
        (status = 204, description = "Rejected"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn reject_testimonial(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    if state.repo.delete_testimonial(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// update_testimonial
///
/// [Admin Route] Partial edit, including flipping approval directly.
#[utoipa::path(
    put,
    path = "/admin/testimonials/{id}",
    params(("id" = Uuid, Path, description = "Testimonial ID")),
    request_body = UpdateTestimonialRequest,
    responses((status = 200, description = "Updated", body = Testimonial))
)]
pub async fn update_testimonial(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTestimonialRequest>,
) -> Result<Json<Testimonial>, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    let testimonial = state
        .repo
        .update_testimonial(id, payload)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(testimonial))
}
