use crate::{
    AppState,
    auth::AuthUser,
    error::ApiError,
    models::{CreateResourceRequest, Page, Resource, UpdateResourceRequest, clamp_limit},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

/// ResourceFilter
///
/// Query parameters for the public resource listing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ResourceFilter {
    pub limit: Option<i64>,
    pub cursor: Option<Uuid>,
    pub category: Option<String>,
    pub search: Option<String>,
}

/// get_resources
///
/// [Public Route] Published resources, newest first, with category and
/// search filtering and cursor pagination. Drafts never appear here; the
/// repository query enforces `is_published = true` unconditionally.
#[utoipa::path(
    get,
    path = "/resources",
    params(ResourceFilter),
    responses((status = 200, description = "Paginated resources"))
)]
pub async fn get_resources(
    State(state): State<AppState>,
    Query(filter): Query<ResourceFilter>,
) -> Result<Json<Page<Resource>>, ApiError> {
    let limit = clamp_limit(filter.limit, 10);
    let rows = state
        .repo
        .list_resources(limit, filter.cursor, filter.category, filter.search)
        .await?;
    Ok(Json(Page::from_rows(rows, limit, |r| r.id)))
}

/// get_featured_resources
///
/// [Public Route] Homepage shortlist, ranked by download count.
#[utoipa::path(
    get,
    path = "/resources/featured",
    params(super::LimitQuery),
    responses((status = 200, description = "Featured resources", body = [Resource]))
)]
pub async fn get_featured_resources(
    State(state): State<AppState>,
    Query(q): Query<super::LimitQuery>,
) -> Result<Json<Vec<Resource>>, ApiError> {
    let limit = q.limit.unwrap_or(3).clamp(1, 10);
    Ok(Json(state.repo.featured_resources(limit).await?))
}

/// get_resource_categories
///
/// [Public Route] Distinct categories across published resources.
#[utoipa::path(
    get,
    path = "/resources/categories",
    responses((status = 200, description = "Categories", body = [String]))
)]
pub async fn get_resource_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.repo.resource_categories().await?))
}

/// get_resource_details
///
/// [Public Route] Single published resource.
#[utoipa::path(
    get,
    path = "/resources/{id}",
    params(("id" = Uuid, Path, description = "Resource ID")),
    responses((status = 200, description = "Found", body = Resource))
)]
pub async fn get_resource_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Resource>, ApiError> {
    let resource = state
        .repo
        .get_published_resource(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(resource))
}

/// download_resource
///
/// [Public Route] Records a download and returns the resource (the client
/// follows `download_url` itself). The counter bump is a single atomic
/// UPDATE, so concurrent downloads all count.
#[utoipa::path(
    post,
    path = "/resources/{id}/download",
    params(("id" = Uuid, Path, description = "Resource ID")),
    responses((status = 200, description = "Download recorded", body = Resource))
)]
pub async fn download_resource(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Resource>, ApiError> {
    let resource = state
        .repo
        .record_download(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(resource))
}

/// get_admin_resources
///
/// [Admin Route] All resources including drafts, newest first.
#[utoipa::path(
    get,
    path = "/admin/resources",
    responses((status = 200, description = "All resources", body = [Resource]))
)]
pub async fn get_admin_resources(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Resource>>, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    Ok(Json(state.repo.list_resources_admin().await?))
}

/// create_resource
///
/// [Admin Route]
#[utoipa::path(
    post,
    path = "/admin/resources",
    request_body = CreateResourceRequest,
    responses((status = 201, description = "Created", body = Resource))
)]
pub async fn create_resource(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateResourceRequest>,
) -> Result<(StatusCode, Json<Resource>), ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    let resource = state.repo.create_resource(payload).await?;
    Ok((StatusCode::CREATED, Json(resource)))
}

/// update_resource
///
/// [Admin Route] Partial update; only provided fields change.
#[utoipa::path(
    put,
    path = "/admin/resources/{id}",
    params(("id" = Uuid, Path, description = "Resource ID")),
    request_body = UpdateResourceRequest,
    responses((status = 200, description = "Updated", body = Resource))
)]
pub async fn update_resource(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateResourceRequest>,
) -> Result<Json<Resource>, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    let resource = state
        .repo
        .update_resource(id, payload)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(resource))
}

/// delete_resource
///
/// [Admin Route]
#[utoipa::path(
    delete,
    path = "/admin/resources/{id}",
    params(("id" = Uuid, Path, description = "Resource ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_resource(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    if state.repo.delete_resource(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
