/// Router Module Index
///
/// Organizes the application's routing logic into security-segregated modules,
/// enforcing a Defense-in-Depth strategy. Access control is applied explicitly
/// at the module level (via Axum layers) or inside the handlers, preventing
/// accidental exposure of protected endpoints.
///
/// The four modules map directly to the portal's access tiers.

/// Routes accessible to all clients (anonymous, read-mostly) plus the
/// identity-provider webhook. Handlers must enforce visibility predicates
/// (is_published / is_active / is_approved) at the Repository level.
pub mod public;

/// Routes protected by the `AuthUser` extractor middleware.
/// Requires a validated user session.
pub mod authenticated;

/// Routes for the psychologist portal, nested under `/psychologist`.
/// Every handler resolves the caller's clinician profile and enforces the
/// PSYCHOLOGIST role.
pub mod psychologist;

/// Routes restricted to users with the 'ADMIN' role, nested under `/admin`.
/// Implements mandatory authorization checks in every handler.
pub mod admin;
