use crate::{
    AppState,
    auth::AuthUser,
    error::ApiError,
    models::{
        CreateProgramRequest, Page, Program, ProgramRegistration, RegisterProgramRequest,
        UpdateProgramRequest, clamp_limit,
    },
    repository::RegistrationOutcome,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// ProgramFilter
///
/// Query parameters for the public program listing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ProgramFilter {
    pub limit: Option<i64>,
    pub cursor: Option<Uuid>,
    pub upcoming_only: Option<bool>,
    pub search: Option<String>,
}

/// ProgramDetail
///
/// Program detail response: the program row with its confirmed registrations
/// attached (admin UIs show the attendee list on the same page).
#[derive(Debug, Serialize, ToSchema)]
pub struct ProgramDetail {
    #[serde(flatten)]
    pub program: Program,
    pub registrations: Vec<ProgramRegistration>,
}

/// get_programs
///
/// [Public Route] Lists programs, soonest first, with search and
/// upcoming-only filtering and cursor pagination.
#[utoipa::path(
    get,
    path = "/programs",
    params(ProgramFilter),
    responses((status = 200, description = "Paginated programs"))
)]
pub async fn get_programs(
    State(state): State<AppState>,
    Query(filter): Query<ProgramFilter>,
) -> Result<Json<Page<Program>>, ApiError> {
    let limit = clamp_limit(filter.limit, 10);
    let rows = state
        .repo
        .list_programs(
            limit,
            filter.cursor,
            filter.upcoming_only.unwrap_or(false),
            filter.search,
        )
        .await?;
    Ok(Json(Page::from_rows(rows, limit, |p| p.id)))
}

/// get_upcoming_programs
///
/// [Public Route] Homepage shortlist of upcoming programs.
#[utoipa::path(
    get,
    path = "/programs/upcoming",
    params(super::LimitQuery),
    responses((status = 200, description = "Upcoming programs", body = [Program]))
)]
pub async fn get_upcoming_programs(
    State(state): State<AppState>,
    Query(q): Query<super::LimitQuery>,
) -> Result<Json<Vec<Program>>, ApiError> {
    let limit = q.limit.unwrap_or(5).clamp(1, 10);
    Ok(Json(state.repo.upcoming_programs(limit).await?))
}

/// get_program_details
///
/// [Public Route] Single program with its confirmed registrations.
#[utoipa::path(
    get,
    path = "/programs/{id}",
    params(("id" = Uuid, Path, description = "Program ID")),
    responses((status = 200, description = "Found", body = ProgramDetail))
)]
pub async fn get_program_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProgramDetail>, ApiError> {
    let program = state.repo.get_program(id).await?.ok_or(ApiError::NotFound)?;
    let registrations = state.repo.program_registrations(id).await?;
    Ok(Json(ProgramDetail {
        program,
        registrations,
    }))
}

/// register_for_program
///
/// [Public Route] Signs an attendee up for a program. No account is needed.
///
/// The repository runs the whole check-and-increment path in one transaction,
/// so a closed program, a duplicate email and a full room each come back as a
/// distinct rejection and the attendee counter can never overshoot capacity.
#[utoipa::path(
    post,
    path = "/programs/{id}/register",
    params(("id" = Uuid, Path, description = "Program ID")),
    request_body = RegisterProgramRequest,
    responses(
        (status = 201, description = "Registered", body = ProgramRegistration),
        (status = 400, description = "Closed or full"),
        (status = 409, description = "Already registered")
    )
)]
pub async fn register_for_program(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RegisterProgramRequest>,
) -> Result<(StatusCode, Json<ProgramRegistration>), ApiError> {
    match state.repo.register_for_program(id, payload).await? {
        RegistrationOutcome::Registered(registration) => {
            Ok((StatusCode::CREATED, Json(registration)))
        }
        RegistrationOutcome::ProgramNotFound => Err(ApiError::NotFound),
        RegistrationOutcome::RegistrationClosed => Err(ApiError::BadRequest(
            "Program registration is closed".to_string(),
        )),
        RegistrationOutcome::AlreadyRegistered => Err(ApiError::Conflict(
            "Already registered for this program".to_string(),
        )),
        RegistrationOutcome::AtCapacity => Err(ApiError::BadRequest(
            "Program is at full capacity".to_string(),
        )),
    }
}

/// get_admin_programs
///
/// [Admin Route] All programs, newest first, upcoming or not.
#[utoipa::path(
    get,
    path = "/admin/programs",
    responses((status = 200, description = "All programs", body = [Program]))
)]
pub async fn get_admin_programs(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Program>>, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    Ok(Json(state.repo.list_programs_admin().await?))
}

/// create_program
///
/// [Admin Route]
#[utoipa::path(
    post,
    path = "/admin/programs",
    request_body = CreateProgramRequest,
    responses((status = 201, description = "Created", body = Program))
)]
pub async fn create_program(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateProgramRequest>,
) -> Result<(StatusCode, Json<Program>), ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    let program = state.repo.create_program(payload).await?;
    Ok((StatusCode::CREATED, Json(program)))
}

/// update_program
///
/// [Admin Route] Partial update; only provided fields change.
#[utoipa::path(
    put,
    path = "/admin/programs/{id}",
    params(("id" = Uuid, Path, description = "Program ID")),
    request_body = UpdateProgramRequest,
    responses((status = 200, description = "Updated", body = Program))
)]
pub async fn update_program(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProgramRequest>,
) -> Result<Json<Program>, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    let program = state
        .repo
        .update_program(id, payload)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(program))
}

/// delete_program
///
/// [Admin Route] Registrations go with the program (FK cascade).
#[utoipa::path(
    delete,
    path = "/admin/programs/{id}",
    params(("id" = Uuid, Path, description = "Program ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_program(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if role != "ADMIN" {
        return Err(ApiError::Forbidden);
    }
    if state.repo.delete_program(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
