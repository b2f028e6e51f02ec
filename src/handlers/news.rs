use crate::{
    AppState,
    auth::AuthUser,
    error::ApiError,
    models::{CreateNewsRequest, NewsItem, Page, UpdateNewsRequest, clamp_limit},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

/// NewsFilter
#[derive(Debug, Deserialize, IntoParams)]
pub struct NewsFilter {
    pub limit: Option<i64>,
    pub cursor: Option<Uuid>,
    pub search: Option<String>,
    pub tag: Option<String>,
}

/// get_news
///
/// [Public Route] Published articles, newest publication first, with search
/// and tag filtering and cursor pagination.
#[utoipa::path(
    get,
    path = "/news",
    params(NewsFilter),
    responses((status = 200, description = "Paginated news"))
)]
pub async fn get_news(
    State(state): State<AppState>,
    Query(filter): Query<NewsFilter>,
) -> Result<Json<Page<NewsItem>>, ApiError> {
    let limit = clamp_limit(filter.limit, 10);
    let rows = state
        .repo
        .list_news(limit, filter.cursor, filter.search, filter.tag)
        .await?;
    Ok(Json(Page::from_rows(rows, limit, |n| n.id)))
}

/// get_latest_news
///
/// [Public Route] Homepage shortlist.
#[utoipa::path(
    get,
    path = "/news/latest",
    params(super::LimitQuery),
    responses((status = 200, description = "Latest news", body = [NewsItem]))
)]
pub async fn get_latest_news(
    State(state): State<AppState>,
    Query(q): Query<super::LimitQuery>,
) -> Result<Json<Vec<NewsItem>>, ApiError> {
    let limit = q.limit.unwrap_or(3).clamp(1, 10);
    Ok(Json(state.repo.latest_news(limit).await?))
}

/// get_news_details
///
/// [Public Route] Single published article; drafts 404.
#[utoipa::path(
    get,
    path = "/news/{id}",
    params(("id" = Uuid, Path, description = "News ID")),
    responses((status = 200, description = "Found", body = NewsItem))
)]
pub async fn get_news_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NewsItem>, ApiError> {
    let item = state
        .repo
        .get_published_news(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(item))
}

/// get_admin_news
///
/// [Admin Route] Every article, drafts included.
#[utoipa::path(
    get,
    path = "/admin/news",
    responses((status = 200, description = "All news", body = [NewsItem]))
)]
pub async fn get_admin_news(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<NewsItem>>, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    Ok(Json(state.repo.list_news_admin().await?))
}

/// create_news
///
/// [Admin Route] Creating with `is_published = true` stamps `published_at`
/// immediately; drafts stay unstamped until published.
#[utoipa::path(
    post,
    path = "/admin/news",
    request_body = CreateNewsRequest,
    responses((status = 201, description = "Created", body = NewsItem))
)]
pub async fn create_news(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateNewsRequest>,
) -> Result<(StatusCode, Json<NewsItem>), ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    let item = state.repo.create_news(payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// update_news
///
/// [Admin Route] Partial update. Setting `is_published = true` re-stamps
/// `published_at`.
#[utoipa::path(
    put,
    path = "/admin/news/{id}",
    params(("id" = Uuid, Path, description = "News ID")),
    request_body = UpdateNewsRequest,
    responses((status = 200, description = "Updated", body = NewsItem))
)]
pub async fn update_news(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateNewsRequest>,
) -> Result<Json<NewsItem>, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    let item = state
        .repo
        .update_news(id, payload)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(item))
}

/// delete_news
///
/// [Admin Route]
#[utoipa::path(
    delete,
    path = "/admin/news/{id}",
    params(("id" = Uuid, Path, description = "News ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_news(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    if state.repo.delete_news(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
