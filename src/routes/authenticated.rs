use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, patch, post},
};

/// Authenticated Router Module
///
/// Routes accessible to any user who has passed the authentication layer:
/// account self-service, the booking flow, and the caller's own history
/// views.
///
/// Access Control Strategy:
/// Every handler here relies on the `AuthUser` extractor middleware applied
/// on the router layer above this module, guaranteeing a validated identity
/// (id + current role) before the handler runs. Ownership checks (e.g. in
/// `cancel_appointment`) and the staff-role check in `update_appointment`
/// happen inside the handlers.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET/PATCH /me
        // The caller's identity row and self-service profile edits.
        .route(
            "/me",
            get(handlers::account::get_me).patch(handlers::account::update_me),
        )
        // GET /me/is-admin
        // Client-side admin gate; real enforcement stays in the admin handlers.
        .route("/me/is-admin", get(handlers::account::is_admin))
        // GET /me/appointments
        // The caller's bookings, status-filterable, cursor-paginated.
        .route("/me/appointments", get(handlers::appointments::get_my_appointments))
        // GET /me/donations
        .route("/me/donations", get(handlers::donations::get_my_donations))
        // --- Booking Flow ---
        // POST /appointments
        // Books a slot. The active-slot unique index is the arbiter: the
        // second writer — sequential or concurrent — receives 409.
        .route("/appointments", post(handlers::appointments::book_appointment))
        // POST /appointments/{id}/cancel
        // Owner-only cancellation; double-cancel is a 400.
        .route(
            "/appointments/{id}/cancel",
            post(handlers::appointments::cancel_appointment),
        )
        // PATCH /appointments/{id}
        // Staff update (ADMIN or PSYCHOLOGIST role, checked in the handler):
        // status, notes, meeting link.
        .route(
            "/appointments/{id}",
            patch(handlers::appointments::update_appointment),
        )
}
