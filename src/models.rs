use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Status Enums (Mapped to Postgres enum types) ---

/// AppointmentStatus
///
/// Lifecycle marker for a booking. There are no validated transitions: any
/// status may be set to any other via the update endpoints. Only PENDING and
/// CONFIRMED rows occupy a slot (see the partial unique index in the schema).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, TS, ToSchema,
)]
#[sqlx(type_name = "appointment_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

/// DonationStatus
///
/// Payment lifecycle for a donation record. New donations start PENDING; an
/// administrator flips the status once the external payment settles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, TS, ToSchema,
)]
#[sqlx(type_name = "donation_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum DonationStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    Refunded,
}

/// ContactStatus
///
/// Triage state of a contact-form submission, managed from the admin inbox.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, TS, ToSchema,
)]
#[sqlx(type_name = "contact_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ContactStatus {
    #[default]
    New,
    InProgress,
    Resolved,
    Closed,
}

/// RegistrationStatus
///
/// State of a program registration. Only CONFIRMED registrations are shown on
/// the public program detail page.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, TS, ToSchema,
)]
#[sqlx(type_name = "registration_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum RegistrationStatus {
    Pending,
    #[default]
    Confirmed,
    Cancelled,
}

// --- Core Application Schemas (Mapped to Database) ---

/// User
///
/// The canonical identity record mirroring the external identity provider.
/// Rows are created and kept in sync by the provider's webhook; every
/// authenticated request re-resolves the caller through `kinde_id`.
/// The `role` string ("ADMIN" / "PSYCHOLOGIST" / "USER") is the RBAC field
/// checked per protected handler.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    // External identity-provider id (unique).
    pub kinde_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub image_url: String,
    pub role: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// Psychologist
///
/// A clinician profile. `availability` holds weekday names ("Monday", ...)
/// used by the public directory filter. `user_id` optionally links the
/// profile to a portal login and is how the psychologist portal resolves
/// "my" appointments.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Psychologist {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub specialization: String,
    pub bio: String,
    pub email: String,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub availability: Vec<String>,
    pub is_active: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// Appointment
///
/// A user <-> psychologist booking at a concrete timestamp. The enrichment
/// fields at the bottom are loaded via JOINs in the repository (aliased
/// columns, `#[sqlx(default)]` so plain selects still map) and give list
/// endpoints the counterpart's display data without a second query.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: Uuid,
    // Nullable: removing a psychologist keeps their appointment history.
    pub psychologist_id: Option<Uuid>,
    #[ts(type = "string")]
    pub date: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub meeting_link: Option<String>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,

    // JOIN enrichment: psychologist summary (user-facing lists).
    #[sqlx(default)]
    pub psychologist_name: Option<String>,
    #[sqlx(default)]
    pub psychologist_specialization: Option<String>,
    #[sqlx(default)]
    pub psychologist_image_url: Option<String>,

    // JOIN enrichment: patient summary (psychologist/admin lists).
    #[sqlx(default)]
    pub patient_name: Option<String>,
    #[sqlx(default)]
    pub patient_email: Option<String>,
}

/// Program
///
/// A clinic event or group program. `current_attendees` is maintained
/// atomically by the registration path and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Program {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    #[ts(type = "string")]
    pub date: DateTime<Utc>,
    pub location: String,
    pub is_upcoming: bool,
    pub max_attendees: Option<i32>,
    pub current_attendees: i32,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// ProgramRegistration
///
/// An attendee signup for a program. (program_id, email) is unique, which is
/// what turns a duplicate signup into a CONFLICT instead of a second row.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct ProgramRegistration {
    pub id: Uuid,
    pub program_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: RegistrationStatus,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// Resource
///
/// Downloadable self-help content metadata. Only published resources are
/// visible on the public surface; `download_count` feeds the featured list.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Resource {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub download_url: Option<String>,
    pub category: String,
    pub file_size: Option<i64>,
    pub file_type: Option<String>,
    pub is_published: bool,
    pub download_count: i32,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// NewsItem
///
/// An article. `published_at` is stamped when the item is first published and
/// drives the public ordering.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct NewsItem {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub image_url: Option<String>,
    pub author: String,
    pub tags: Vec<String>,
    pub is_published: bool,
    #[ts(type = "string | null")]
    pub published_at: Option<DateTime<Utc>>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// Donation
///
/// A payment record. `transaction_id` is the external gateway reference set
/// when an administrator marks the donation settled. The donor enrichment
/// fields are JOIN-loaded for the admin list.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Donation {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub amount: f64,
    pub currency: String,
    pub payment_method: String,
    pub donor_name: Option<String>,
    pub donor_email: Option<String>,
    pub is_anonymous: bool,
    pub message: Option<String>,
    pub status: DonationStatus,
    pub transaction_id: Option<String>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,

    // JOIN enrichment for the admin list.
    #[sqlx(default)]
    pub user_email: Option<String>,
    #[sqlx(default)]
    pub user_name: Option<String>,
}

/// Testimonial
///
/// Publicly-submitted feedback; hidden until an administrator approves it.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Testimonial {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub content: String,
    pub image_url: Option<String>,
    pub rating: Option<i32>,
    pub is_approved: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// Partner
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Partner {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub is_active: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// ContactSubmission
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct ContactSubmission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
    pub response: Option<String>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

// --- Pagination Envelope ---

/// Page
///
/// Cursor-pagination envelope shared by every paginated list endpoint.
/// Repositories fetch `limit + 1` rows; the overflow row is popped and its id
/// becomes `next_cursor`. The cursor row itself is included at the start of
/// the following page, so pages tile the result set without gaps.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<Uuid>,
}

impl<T> Page<T> {
    /// Builds the envelope from an over-fetched row set.
    /// `next_cursor` is present iff more than `limit` rows were returned.
    pub fn from_rows(mut rows: Vec<T>, limit: i64, id_of: impl Fn(&T) -> Uuid) -> Self {
        let mut next_cursor = None;
        if rows.len() as i64 > limit {
            if let Some(overflow) = rows.pop() {
                next_cursor = Some(id_of(&overflow));
            }
        }
        Page {
            items: rows,
            next_cursor,
        }
    }
}

/// Clamps a client-supplied page size into the accepted 1..=100 window,
/// falling back to the endpoint default when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, 100)
}

// --- Request Payloads (Input Schemas) ---

/// BookAppointmentRequest
///
/// Input for POST /appointments. `date` is the exact slot start timestamp as
/// returned by the slot listing.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct BookAppointmentRequest {
    pub psychologist_id: Uuid,
    #[ts(type = "string")]
    pub date: DateTime<Utc>,
    /// Minutes; defaults to a one-hour session.
    pub duration_minutes: Option<i32>,
    pub notes: Option<String>,
}

/// UpdateAppointmentRequest
///
/// Staff-side update (ADMIN or PSYCHOLOGIST). Status is mandatory; notes and
/// meeting link ride along when provided. No transition rules are enforced.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct UpdateAppointmentRequest {
    pub status: AppointmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
}

/// CreateProgramRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct CreateProgramRequest {
    pub title: String,
    pub description: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    #[ts(type = "string")]
    pub date: DateTime<Utc>,
    pub location: String,
    #[serde(default = "default_true")]
    pub is_upcoming: bool,
    pub max_attendees: Option<i32>,
}

/// UpdateProgramRequest
///
/// Partial update payload. Uses `Option<T>` for all fields and
/// `#[serde(skip_serializing_if = "Option::is_none")]` so only provided
/// fields travel; the repository applies them with COALESCE.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateProgramRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "string")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_upcoming: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<i32>,
}

/// RegisterProgramRequest
///
/// Public signup for a program; no account required.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RegisterProgramRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// CreateResourceRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct CreateResourceRequest {
    pub title: String,
    pub description: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub download_url: Option<String>,
    pub category: String,
    pub file_size: Option<i64>,
    pub file_type: Option<String>,
    #[serde(default = "default_true")]
    pub is_published: bool,
}

/// UpdateResourceRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateResourceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

/// CreateNewsRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct CreateNewsRequest {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub image_url: Option<String>,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_published: bool,
}

/// UpdateNewsRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateNewsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

/// CreatePsychologistRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct CreatePsychologistRequest {
    pub name: String,
    pub specialization: String,
    pub bio: String,
    pub email: String,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub availability: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Optional portal login to link the profile to.
    pub user_id: Option<Uuid>,
}

/// UpdatePsychologistRequest
///
/// Shared by the admin CRUD and the psychologist's own profile endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdatePsychologistRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// CreateDonationRequest
///
/// Public donation submission. The row is stored PENDING; settlement is
/// recorded later by an administrator (no gateway round-trip here).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct CreateDonationRequest {
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub payment_method: String,
    pub donor_name: Option<String>,
    pub donor_email: Option<String>,
    #[serde(default)]
    pub is_anonymous: bool,
    pub message: Option<String>,
}

/// UpdateDonationStatusRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct UpdateDonationStatusRequest {
    pub status: DonationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

/// SubmitTestimonialRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct SubmitTestimonialRequest {
    pub name: String,
    pub role: String,
    pub content: String,
    pub image_url: Option<String>,
    pub rating: Option<i32>,
}

/// UpdateTestimonialRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateTestimonialRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_approved: Option<bool>,
}

/// CreatePartnerRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct CreatePartnerRequest {
    pub name: String,
    pub description: String,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// UpdatePartnerRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdatePartnerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// SubmitContactRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct SubmitContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

/// UpdateContactStatusRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct UpdateContactStatusRequest {
    pub status: ContactStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

/// UpdateProfileRequest
///
/// Self-service account edits for the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

// --- Dashboard & Stats Schemas (Output) ---

/// AdminDashboardStats
///
/// Output schema for the administrative statistics dashboard (GET /admin/stats).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct AdminDashboardStats {
    pub programs: i64,
    pub resources: i64,
    pub news: i64,
    pub psychologists: i64,
    pub appointments: i64,
}

/// DonationStats
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct DonationStats {
    pub total_donations: i64,
    /// Sum over COMPLETED donations only.
    pub total_amount: f64,
    pub completed_donations: i64,
    pub pending_donations: i64,
}

/// ContactStats
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ContactStats {
    pub total: i64,
    pub new: i64,
    pub in_progress: i64,
    pub resolved: i64,
    pub closed: i64,
}

/// PsychologistDashboardStats
///
/// Counters for the psychologist portal landing page.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct PsychologistDashboardStats {
    pub today_appointments: i64,
    pub week_appointments: i64,
    pub total_appointments: i64,
}

// --- Serde Defaults ---

fn default_true() -> bool {
    true
}

fn default_currency() -> String {
    "USD".to_string()
}
