use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, put},
};

/// Psychologist Portal Router Module
///
/// Nested under `/psychologist`. Every handler resolves the caller's
/// clinician profile via their login link and enforces the PSYCHOLOGIST role;
/// a staff member without a linked profile gets 404, anyone else 403.
pub fn psychologist_routes() -> Router<AppState> {
    Router::new()
        // GET /psychologist/stats
        // Today / this-week / total appointment counters for the dashboard.
        .route("/stats", get(handlers::portal::get_portal_stats))
        // GET /psychologist/appointments
        // Full appointment list with status and date-range filters.
        .route("/appointments", get(handlers::portal::get_portal_appointments))
        // GET /psychologist/appointments/recent
        .route(
            "/appointments/recent",
            get(handlers::portal::get_recent_portal_appointments),
        )
        // PUT /psychologist/appointments/{id}/status
        // Ownership-checked status/notes update on the caller's own bookings.
        .route(
            "/appointments/{id}/status",
            put(handlers::portal::update_portal_appointment),
        )
        // GET/PUT /psychologist/profile
        // The caller's own clinician profile.
        .route(
            "/profile",
            get(handlers::portal::get_portal_profile).put(handlers::portal::update_portal_profile),
        )
}
