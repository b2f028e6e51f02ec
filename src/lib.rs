use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod scheduling;

// Module for routing segregation (Public, Authenticated, Psychologist, Admin).
pub mod routes;
use auth::AuthUser; // The resolved authenticated user identity.
use routes::{admin, authenticated, psychologist, public};

// --- Public Re-exports ---

// Makes core state types easily accessible to the main application entry point (main.rs).
pub use config::AppConfig;
pub use error::ApiError;
pub use repository::{PostgresRepository, RepositoryState};

/// ApiDoc
///
/// Auto-generates the OpenAPI documentation (Swagger JSON) for the portal.
/// It aggregates all API paths and data schemas decorated with the
/// `#[utoipa::path]` and `#[derive(utoipa::ToSchema)]` macros.
/// The resulting JSON is served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::programs::get_programs, handlers::programs::get_upcoming_programs,
        handlers::programs::get_program_details, handlers::programs::register_for_program,
        handlers::programs::get_admin_programs, handlers::programs::create_program,
        handlers::programs::update_program, handlers::programs::delete_program,
        handlers::resources::get_resources, handlers::resources::get_featured_resources,
        handlers::resources::get_resource_categories, handlers::resources::get_resource_details,
        handlers::resources::download_resource, handlers::resources::get_admin_resources,
        handlers::resources::create_resource, handlers::resources::update_resource,
        handlers::resources::delete_resource,
        handlers::news::get_news, handlers::news::get_latest_news,
        handlers::news::get_news_details, handlers::news::get_admin_news,
        handlers::news::create_news, handlers::news::update_news, handlers::news::delete_news,
        handlers::psychologists::get_psychologists,
        handlers::psychologists::get_featured_psychologists,
        handlers::psychologists::get_available_slots,
        handlers::psychologists::get_admin_psychologists,
        handlers::psychologists::create_psychologist,
        handlers::psychologists::update_psychologist,
        handlers::psychologists::delete_psychologist,
        handlers::appointments::get_my_appointments, handlers::appointments::book_appointment,
        handlers::appointments::cancel_appointment, handlers::appointments::update_appointment,
        handlers::appointments::get_admin_appointments,
        handlers::portal::get_portal_stats, handlers::portal::get_portal_appointments,
        handlers::portal::get_recent_portal_appointments,
        handlers::portal::update_portal_appointment, handlers::portal::get_portal_profile,
        handlers::portal::update_portal_profile,
        handlers::donations::create_donation, handlers::donations::get_donation_details,
        handlers::donations::get_my_donations, handlers::donations::get_admin_donations,
        handlers::donations::update_donation_status, handlers::donations::get_donation_stats,
        handlers::testimonials::get_testimonials, handlers::testimonials::get_testimonial_details,
        handlers::testimonials::submit_testimonial, handlers::testimonials::get_admin_testimonials,
        handlers::testimonials::approve_testimonial, handlers::testimonials::reject_testimonial,
        handlers::testimonials::update_testimonial,
        handlers::partners::get_partners, handlers::partners::get_partner_details,
        handlers::partners::get_admin_partners, handlers::partners::create_partner,
        handlers::partners::update_partner, handlers::partners::delete_partner,
        handlers::contact::submit_contact, handlers::contact::get_admin_contact_submissions,
        handlers::contact::get_contact_submission_details, handlers::contact::update_contact_status,
        handlers::contact::get_contact_stats,
        handlers::account::get_me, handlers::account::update_me, handlers::account::is_admin,
        handlers::admin::get_admin_stats,
        handlers::webhooks::identity_webhook,
    ),
    components(
        schemas(
            models::User, models::Psychologist, models::Appointment, models::AppointmentStatus,
            models::Program, models::ProgramRegistration, models::RegistrationStatus,
            models::Resource, models::NewsItem, models::Donation, models::DonationStatus,
            models::Testimonial, models::Partner, models::ContactSubmission, models::ContactStatus,
            models::BookAppointmentRequest, models::UpdateAppointmentRequest,
            models::CreateProgramRequest, models::UpdateProgramRequest,
            models::RegisterProgramRequest, models::CreateResourceRequest,
            models::UpdateResourceRequest, models::CreateNewsRequest, models::UpdateNewsRequest,
            models::CreatePsychologistRequest, models::UpdatePsychologistRequest,
            models::CreateDonationRequest, models::UpdateDonationStatusRequest,
            models::SubmitTestimonialRequest, models::UpdateTestimonialRequest,
            models::CreatePartnerRequest, models::UpdatePartnerRequest,
            models::SubmitContactRequest, models::UpdateContactStatusRequest,
            models::UpdateProfileRequest, models::AdminDashboardStats, models::DonationStats,
            models::ContactStats, models::PsychologistDashboardStats,
            scheduling::Slot, handlers::programs::ProgramDetail,
        )
    ),
    tags(
        (name = "calme-portal", description = "Cal-me Clinic Portal API")
    )
)]
struct ApiDoc;

/// AppState
///
/// Implements the **Unified State Pattern**: the single, thread-safe,
/// immutable container holding all essential application services and
/// configuration, shared across all incoming requests.
#[derive(Clone)]
pub struct AppState {
    /// Repository Layer: Abstracts database access via the PgPool connection.
    pub repo: RepositoryState,
    /// Configuration: The loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// These implementations allow handlers and extractors to selectively pull
// components from the shared AppState.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Enforces authentication for the `authenticated_routes`.
///
/// *Mechanism*: It attempts to extract `AuthUser` from the request. Since
/// `AuthUser` implements `FromRequestParts`, if authentication (JWT
/// validation, DB lookup) fails, the extractor immediately rejects the
/// request with 401 Unauthorized, preventing execution of the handler.
async fn auth_middleware(_auth_user: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the application's entire routing structure, applies global and
/// scoped middleware, and registers the application state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Documentation: Serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public Routes: No middleware applied.
        .merge(public::public_routes())
        // Authenticated Routes: Protected by the `auth_middleware`.
        // First layer of Defense-in-Depth for these routes.
        .merge(
            authenticated::authenticated_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        )
        // Psychologist Portal: Nested under '/psychologist'. The PSYCHOLOGIST
        // role check and profile resolution happen inside the handlers after
        // the AuthUser extractor authenticates the caller.
        .nest("/psychologist", psychologist::psychologist_routes())
        // Admin Routes: Nested under '/admin'. The 'ADMIN' role check is
        // performed inside the handlers once the extractor has resolved the
        // caller's identity and current role.
        .nest("/admin", admin::admin_routes())
        // Apply the Unified State to all routes.
        .with_state(state);

    // 3. Observability and Correlation Layers (Applied outermost/first)
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID Generation: a unique UUID per incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Request Tracing: wraps the request/response lifecycle in
                // a span correlated by the generated request id.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID Propagation: return the x-request-id header
                // to the client and downstream services.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer (applied last)
        .layer(cors)
}

/// trace_span_logger
///
/// Customizes `TraceLayer` span creation: extracts the `x-request-id` header
/// (if present) and includes it in the structured logging metadata alongside
/// the HTTP method and URI, so every log line for one request correlates.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
