use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post, put},
};

/// Admin Router Module
///
/// Nested under `/admin`: content CRUD over every resource type, the
/// moderation queues, and the dashboards.
///
/// Access Control:
/// Every handler authenticates via the `AuthUser` extractor and then
/// explicitly checks `role == "ADMIN"` before touching the repository, so a
/// non-admin caller receives 403 and no mutation occurs.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin/stats
        // Entity counters (programs, resources, news, psychologists,
        // appointments) for the dashboard landing page.
        .route("/stats", get(handlers::admin::get_admin_stats))
        // --- Programs CRUD ---
        .route(
            "/programs",
            get(handlers::programs::get_admin_programs).post(handlers::programs::create_program),
        )
        .route(
            "/programs/{id}",
            put(handlers::programs::update_program).delete(handlers::programs::delete_program),
        )
        // --- Resources CRUD (drafts included in the list) ---
        .route(
            "/resources",
            get(handlers::resources::get_admin_resources)
                .post(handlers::resources::create_resource),
        )
        .route(
            "/resources/{id}",
            put(handlers::resources::update_resource).delete(handlers::resources::delete_resource),
        )
        // --- News CRUD ---
        .route(
            "/news",
            get(handlers::news::get_admin_news).post(handlers::news::create_news),
        )
        .route(
            "/news/{id}",
            put(handlers::news::update_news).delete(handlers::news::delete_news),
        )
        // --- Psychologists CRUD ---
        .route(
            "/psychologists",
            get(handlers::psychologists::get_admin_psychologists)
                .post(handlers::psychologists::create_psychologist),
        )
        .route(
            "/psychologists/{id}",
            put(handlers::psychologists::update_psychologist)
                .delete(handlers::psychologists::delete_psychologist),
        )
        // GET /admin/appointments
        // Global appointment overview with both parties joined in.
        .route("/appointments", get(handlers::appointments::get_admin_appointments))
        // --- Donations ---
        .route("/donations", get(handlers::donations::get_admin_donations))
        .route("/donations/stats", get(handlers::donations::get_donation_stats))
        // PUT /admin/donations/{id}/status
        // Settlement bookkeeping: flips PENDING to COMPLETED/FAILED/REFUNDED
        // and records the gateway's transaction reference.
        .route(
            "/donations/{id}/status",
            put(handlers::donations::update_donation_status),
        )
        // --- Testimonial moderation ---
        .route("/testimonials", get(handlers::testimonials::get_admin_testimonials))
        .route(
            "/testimonials/{id}",
            put(handlers::testimonials::update_testimonial)
                .delete(handlers::testimonials::reject_testimonial),
        )
        .route(
            "/testimonials/{id}/approve",
            post(handlers::testimonials::approve_testimonial),
        )
        // --- Partners CRUD ---
        .route(
            "/partners",
            get(handlers::partners::get_admin_partners).post(handlers::partners::create_partner),
        )
        .route(
            "/partners/{id}",
            put(handlers::partners::update_partner).delete(handlers::partners::delete_partner),
        )
        // --- Contact inbox ---
        .route("/contact", get(handlers::contact::get_admin_contact_submissions))
        .route("/contact/stats", get(handlers::contact::get_contact_stats))
        .route(
            "/contact/{id}",
            get(handlers::contact::get_contact_submission_details),
        )
        .route(
            "/contact/{id}/status",
            put(handlers::contact::update_contact_status),
        )
}
