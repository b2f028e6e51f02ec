use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Defines endpoints that are **unauthenticated** and accessible to any client
/// (anonymous or logged-in): the marketing-site reads, the public submission
/// forms, and the identity-provider webhook.
///
/// Security Mandate:
/// All data retrieval handlers in this module must enforce their visibility
/// predicate (`is_published` / `is_active` / `is_approved` / `is_upcoming`)
/// at the Repository level. Drafts, deactivated profiles and unmoderated
/// submissions must never leak to anonymous clients.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Unauthenticated endpoint for monitoring and load balancer checks.
        .route("/health", get(|| async { "ok" }))
        // POST /webhooks/identity
        // Identity-provider sync: user.created / user.updated / user.deleted.
        // Authenticated by the webhook token itself, not by a session.
        .route("/webhooks/identity", post(handlers::webhooks::identity_webhook))
        // --- Programs ---
        .route("/programs", get(handlers::programs::get_programs))
        .route("/programs/upcoming", get(handlers::programs::get_upcoming_programs))
        .route("/programs/{id}", get(handlers::programs::get_program_details))
        // POST /programs/{id}/register
        // Open signup; duplicate/full/closed rejections come from the
        // transactional repository path.
        .route("/programs/{id}/register", post(handlers::programs::register_for_program))
        // --- Resources ---
        .route("/resources", get(handlers::resources::get_resources))
        .route("/resources/featured", get(handlers::resources::get_featured_resources))
        .route("/resources/categories", get(handlers::resources::get_resource_categories))
        .route("/resources/{id}", get(handlers::resources::get_resource_details))
        // POST /resources/{id}/download
        // Atomic download-counter bump; returns the resource metadata.
        .route("/resources/{id}/download", post(handlers::resources::download_resource))
        // --- News ---
        .route("/news", get(handlers::news::get_news))
        .route("/news/latest", get(handlers::news::get_latest_news))
        .route("/news/{id}", get(handlers::news::get_news_details))
        // --- Psychologists (directory + slot availability) ---
        .route("/psychologists", get(handlers::psychologists::get_psychologists))
        .route(
            "/psychologists/featured",
            get(handlers::psychologists::get_featured_psychologists),
        )
        // GET /psychologists/{id}/slots?date=YYYY-MM-DD
        // The 9-to-5 hourly availability window for one calendar day.
        .route(
            "/psychologists/{id}/slots",
            get(handlers::psychologists::get_available_slots),
        )
        // --- Testimonials ---
        .route(
            "/testimonials",
            get(handlers::testimonials::get_testimonials)
                .post(handlers::testimonials::submit_testimonial),
        )
        .route(
            "/testimonials/{id}",
            get(handlers::testimonials::get_testimonial_details),
        )
        // --- Partners ---
        .route("/partners", get(handlers::partners::get_partners))
        .route("/partners/{id}", get(handlers::partners::get_partner_details))
        // --- Donations ---
        // POST is public: anonymous donors are welcome; a live session just
        // links the record to the account (optional extractor).
        .route("/donations", post(handlers::donations::create_donation))
        .route("/donations/{id}", get(handlers::donations::get_donation_details))
        // --- Contact ---
        .route("/contact", post(handlers::contact::submit_contact))
}
