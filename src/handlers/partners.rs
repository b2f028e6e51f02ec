use crate::{
    AppState,
    auth::AuthUser,
    error::ApiError,
    models::{CreatePartnerRequest, Partner, UpdatePartnerRequest},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

/// get_partners
///
/// [Public Route] Active partner organisations, alphabetical.
#[utoipa::path(
    get,
    path = "/partners",
    responses((status = 200, description = "Active partners", body = [Partner]))
)]
pub async fn get_partners(State(state): State<AppState>) -> Result<Json<Vec<Partner>>, ApiError> {
    Ok(Json(state.repo.active_partners().await?))
}

/// get_partner_details
///
/// [Public Route] Single active partner; deactivated ones 404.
#[utoipa::path(
    get,
    path = "/partners/{id}",
    params(("id" = Uuid, Path, description = "Partner ID")),
    responses((status = 200, description = "Found", body = Partner))
)]
pub async fn get_partner_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Partner>, ApiError> {
    let partner = state
        .repo
        .get_active_partner(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(partner))
}

/// get_admin_partners
///
/// [Admin Route] All partners, active or not.
#[utoipa::path(
    get,
    path = "/admin/partners",
    responses((status = 200, description = "All partners", body = [Partner]))
)]
pub async fn get_admin_partners(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Partner>>, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    Ok(Json(state.repo.list_partners_admin().await?))
}

/// create_partner
///
/// [Admin Route]
#[utoipa::path(
    post,
    path = "/admin/partners",
    request_body = CreatePartnerRequest,
    responses((status = 201, description = "Created", body = Partner))
)]
pub async fn create_partner(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreatePartnerRequest>,
) -> Result<(StatusCode, Json<Partner>), ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    let partner = state.repo.create_partner(payload).await?;
    Ok((StatusCode::CREATED, Json(partner)))
}

/// update_partner
///
/// [Admin Route]
#[utoipa::path(
    put,
    path = "/admin/partners/{id}",
    params(("id" = Uuid, Path, description = "Partner ID")),
    request_body = UpdatePartnerRequest,
    responses((status = 200, description = "Updated", body = Partner))
)]
pub async fn update_partner(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePartnerRequest>,
) -> Result<Json<Partner>, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    let partner = state
        .repo
        .update_partner(id, payload)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(partner))
}

/// delete_partner
///
/// [Admin Route]
#[utoipa::path(
    delete,
    path = "/admin/partners/{id}",
    params(("id" = Uuid, Path, description = "Partner ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_partner(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    if state.repo.delete_partner(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
