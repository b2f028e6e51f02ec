/// Handler Module Index
///
/// One module per resource domain, mirroring the API surface: each module
/// holds the public handlers and the admin CRUD for its entity. Handlers stay
/// thin — authentication comes from the `AuthUser` extractor, authorization is
/// an inline role check, and everything else is a repository pass-through with
/// `?` error propagation.
pub mod account;
pub mod admin;
pub mod appointments;
pub mod contact;
pub mod donations;
pub mod news;
pub mod partners;
pub mod portal;
pub mod programs;
pub mod psychologists;
pub mod resources;
pub mod testimonials;
pub mod webhooks;

use serde::Deserialize;
use utoipa::IntoParams;

/// LimitQuery
///
/// Shared query shape for the un-paginated shortlist endpoints
/// (featured/latest/upcoming lists on the homepage).
#[derive(Debug, Deserialize, IntoParams)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}
