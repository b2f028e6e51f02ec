use crate::models::{
    AdminDashboardStats, Appointment, AppointmentStatus, BookAppointmentRequest, ContactStats,
    ContactSubmission, CreateDonationRequest, CreateNewsRequest, CreatePartnerRequest,
    CreateProgramRequest, CreatePsychologistRequest, CreateResourceRequest, Donation,
    DonationStats, NewsItem, Partner, Program, ProgramRegistration, Psychologist,
    PsychologistDashboardStats, RegisterProgramRequest, Resource, SubmitContactRequest,
    SubmitTestimonialRequest, Testimonial, UpdateAppointmentRequest, UpdateContactStatusRequest,
    UpdateDonationStatusRequest, UpdateNewsRequest, UpdatePartnerRequest, UpdateProfileRequest,
    UpdateProgramRequest, UpdatePsychologistRequest, UpdateResourceRequest,
    UpdateTestimonialRequest, User,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, query_builder::QueryBuilder};
use std::sync::Arc;
use uuid::Uuid;

/// RegistrationOutcome
///
/// Result of the transactional program-registration path. The handler maps
/// each rejection to its coarse error code.
#[derive(Debug, Clone)]
pub enum RegistrationOutcome {
    Registered(ProgramRegistration),
    ProgramNotFound,
    RegistrationClosed,
    AlreadyRegistered,
    AtCapacity,
}

/// Repository Trait
///
/// The abstract contract for all persistence operations. Handlers interact
/// with the data layer only through this trait (`Arc<dyn Repository>`), which
/// keeps them testable against in-memory mocks.
///
/// Every method returns `Result<_, sqlx::Error>`; handlers propagate with `?`
/// and the error layer maps failures to an opaque 500.
///
/// Visibility predicates (is_published / is_active / is_approved) are
/// enforced here, in the queries, never in the handlers.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Users / Identity ---
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, sqlx::Error>;
    async fn get_user_by_kinde_id(&self, kinde_id: &str) -> Result<Option<User>, sqlx::Error>;
    // Webhook sync: insert-or-update keyed on the external identity id.
    async fn upsert_user(
        &self,
        kinde_id: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
        image_url: &str,
    ) -> Result<User, sqlx::Error>;
    // Webhook sync: returns true if a row was removed.
    async fn delete_user_by_kinde_id(&self, kinde_id: &str) -> Result<bool, sqlx::Error>;
    async fn update_profile(
        &self,
        id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<Option<User>, sqlx::Error>;

    // --- Psychologists ---
    async fn list_public_psychologists(
        &self,
        specialization: Option<String>,
        availability: Option<String>,
    ) -> Result<Vec<Psychologist>, sqlx::Error>;
    async fn shortlist_psychologists(&self, limit: i64) -> Result<Vec<Psychologist>, sqlx::Error>;
    async fn get_psychologist(&self, id: Uuid) -> Result<Option<Psychologist>, sqlx::Error>;
    async fn get_psychologist_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Psychologist>, sqlx::Error>;
    async fn list_psychologists_admin(&self) -> Result<Vec<Psychologist>, sqlx::Error>;
    async fn create_psychologist(
        &self,
        req: CreatePsychologistRequest,
    ) -> Result<Psychologist, sqlx::Error>;
    async fn update_psychologist(
        &self,
        id: Uuid,
        req: UpdatePsychologistRequest,
    ) -> Result<Option<Psychologist>, sqlx::Error>;
    async fn delete_psychologist(&self, id: Uuid) -> Result<bool, sqlx::Error>;

    // --- Appointments ---
    // Start times of slot-blocking (PENDING/CONFIRMED) appointments in [from, to).
    async fn blocking_appointments(
        &self,
        psychologist_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, sqlx::Error>;
    // Conflict-checked insert against the active-slot unique index.
    // Ok(None) means the slot is already taken.
    async fn book_appointment(
        &self,
        user_id: Uuid,
        req: BookAppointmentRequest,
    ) -> Result<Option<Appointment>, sqlx::Error>;
    async fn my_appointments(
        &self,
        user_id: Uuid,
        limit: i64,
        cursor: Option<Uuid>,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<Appointment>, sqlx::Error>;
    async fn get_appointment(&self, id: Uuid) -> Result<Option<Appointment>, sqlx::Error>;
    async fn set_appointment_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, sqlx::Error>;
    async fn update_appointment(
        &self,
        id: Uuid,
        req: UpdateAppointmentRequest,
    ) -> Result<Option<Appointment>, sqlx::Error>;
    async fn list_appointments_admin(&self) -> Result<Vec<Appointment>, sqlx::Error>;

    // --- Psychologist Portal ---
    async fn psychologist_stats(
        &self,
        psychologist_id: Uuid,
        today: (DateTime<Utc>, DateTime<Utc>),
        week: (DateTime<Utc>, DateTime<Utc>),
    ) -> Result<PsychologistDashboardStats, sqlx::Error>;
    async fn appointments_for_psychologist(
        &self,
        psychologist_id: Uuid,
        status: Option<AppointmentStatus>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Appointment>, sqlx::Error>;
    async fn recent_appointments(
        &self,
        psychologist_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Appointment>, sqlx::Error>;
    // Ownership-checked fetch: only returns the row if it belongs to the psychologist.
    async fn get_psychologist_appointment(
        &self,
        id: Uuid,
        psychologist_id: Uuid,
    ) -> Result<Option<Appointment>, sqlx::Error>;

    // --- Programs ---
    async fn list_programs(
        &self,
        limit: i64,
        cursor: Option<Uuid>,
        upcoming_only: bool,
        search: Option<String>,
    ) -> Result<Vec<Program>, sqlx::Error>;
    async fn upcoming_programs(&self, limit: i64) -> Result<Vec<Program>, sqlx::Error>;
    async fn get_program(&self, id: Uuid) -> Result<Option<Program>, sqlx::Error>;
    async fn program_registrations(
        &self,
        program_id: Uuid,
    ) -> Result<Vec<ProgramRegistration>, sqlx::Error>;
    // Transactional: existence + closed + duplicate + capacity checks and the
    // attendee-counter increment happen under one transaction.
    async fn register_for_program(
        &self,
        program_id: Uuid,
        req: RegisterProgramRequest,
    ) -> Result<RegistrationOutcome, sqlx::Error>;
    async fn list_programs_admin(&self) -> Result<Vec<Program>, sqlx::Error>;
    async fn create_program(&self, req: CreateProgramRequest) -> Result<Program, sqlx::Error>;
    async fn update_program(
        &self,
        id: Uuid,
        req: UpdateProgramRequest,
    ) -> Result<Option<Program>, sqlx::Error>;
    async fn delete_program(&self, id: Uuid) -> Result<bool, sqlx::Error>;

    // --- Resources ---
    async fn list_resources(
        &self,
        limit: i64,
        cursor: Option<Uuid>,
        category: Option<String>,
        search: Option<String>,
    ) -> Result<Vec<Resource>, sqlx::Error>;
    async fn featured_resources(&self, limit: i64) -> Result<Vec<Resource>, sqlx::Error>;
    async fn resource_categories(&self) -> Result<Vec<String>, sqlx::Error>;
    async fn get_published_resource(&self, id: Uuid) -> Result<Option<Resource>, sqlx::Error>;
    // Atomic download-counter bump; only published resources count.
    async fn record_download(&self, id: Uuid) -> Result<Option<Resource>, sqlx::Error>;
    async fn list_resources_admin(&self) -> Result<Vec<Resource>, sqlx::Error>;
    async fn create_resource(&self, req: CreateResourceRequest) -> Result<Resource, sqlx::Error>;
    async fn update_resource(
        &self,
        id: Uuid,
        req: UpdateResourceRequest,
    ) -> Result<Option<Resource>, sqlx::Error>;
    async fn delete_resource(&self, id: Uuid) -> Result<bool, sqlx::Error>;

    // --- News ---
    async fn list_news(
        &self,
        limit: i64,
        cursor: Option<Uuid>,
        search: Option<String>,
        tag: Option<String>,
    ) -> Result<Vec<NewsItem>, sqlx::Error>;
    async fn latest_news(&self, limit: i64) -> Result<Vec<NewsItem>, sqlx::Error>;
    async fn get_published_news(&self, id: Uuid) -> Result<Option<NewsItem>, sqlx::Error>;
    async fn list_news_admin(&self) -> Result<Vec<NewsItem>, sqlx::Error>;
    async fn create_news(&self, req: CreateNewsRequest) -> Result<NewsItem, sqlx::Error>;
    async fn update_news(
        &self,
        id: Uuid,
        req: UpdateNewsRequest,
    ) -> Result<Option<NewsItem>, sqlx::Error>;
    async fn delete_news(&self, id: Uuid) -> Result<bool, sqlx::Error>;

    // --- Donations ---
    async fn create_donation(
        &self,
        user_id: Option<Uuid>,
        req: CreateDonationRequest,
    ) -> Result<Donation, sqlx::Error>;
    async fn get_donation(&self, id: Uuid) -> Result<Option<Donation>, sqlx::Error>;
    async fn my_donations(
        &self,
        user_id: Uuid,
        limit: i64,
        cursor: Option<Uuid>,
    ) -> Result<Vec<Donation>, sqlx::Error>;
    async fn recent_donations(
        &self,
        limit: i64,
        cursor: Option<Uuid>,
    ) -> Result<Vec<Donation>, sqlx::Error>;
    async fn update_donation_status(
        &self,
        id: Uuid,
        req: UpdateDonationStatusRequest,
    ) -> Result<Option<Donation>, sqlx::Error>;
    async fn donation_stats(&self) -> Result<DonationStats, sqlx::Error>;

    // --- Testimonials ---
    async fn approved_testimonials(&self) -> Result<Vec<Testimonial>, sqlx::Error>;
    async fn get_approved_testimonial(&self, id: Uuid)
    -> Result<Option<Testimonial>, sqlx::Error>;
    async fn submit_testimonial(
        &self,
        req: SubmitTestimonialRequest,
    ) -> Result<Testimonial, sqlx::Error>;
    async fn list_testimonials_admin(
        &self,
        limit: i64,
        cursor: Option<Uuid>,
        approved: Option<bool>,
    ) -> Result<Vec<Testimonial>, sqlx::Error>;
    async fn approve_testimonial(&self, id: Uuid) -> Result<Option<Testimonial>, sqlx::Error>;
    async fn update_testimonial(
        &self,
        id: Uuid,
        req: UpdateTestimonialRequest,
    ) -> Result<Option<Testimonial>, sqlx::Error>;
    async fn delete_testimonial(&self, id: Uuid) -> Result<bool, sqlx::Error>;

    // --- Partners ---
    async fn active_partners(&self) -> Result<Vec<Partner>, sqlx::Error>;
    async fn get_active_partner(&self, id: Uuid) -> Result<Option<Partner>, sqlx::Error>;
    async fn list_partners_admin(&self) -> Result<Vec<Partner>, sqlx::Error>;
    async fn create_partner(&self, req: CreatePartnerRequest) -> Result<Partner, sqlx::Error>;
    async fn update_partner(
        &self,
        id: Uuid,
        req: UpdatePartnerRequest,
    ) -> Result<Option<Partner>, sqlx::Error>;
    async fn delete_partner(&self, id: Uuid) -> Result<bool, sqlx::Error>;

    // --- Contact ---
    async fn submit_contact(
        &self,
        req: SubmitContactRequest,
    ) -> Result<ContactSubmission, sqlx::Error>;
    async fn list_contact_submissions(
        &self,
        limit: i64,
        cursor: Option<Uuid>,
        status: Option<crate::models::ContactStatus>,
        search: Option<String>,
    ) -> Result<Vec<ContactSubmission>, sqlx::Error>;
    async fn get_contact_submission(
        &self,
        id: Uuid,
    ) -> Result<Option<ContactSubmission>, sqlx::Error>;
    async fn update_contact_status(
        &self,
        id: Uuid,
        req: UpdateContactStatusRequest,
    ) -> Result<Option<ContactSubmission>, sqlx::Error>;
    async fn contact_stats(&self) -> Result<ContactStats, sqlx::Error>;

    // --- Admin Dashboard ---
    async fn admin_stats(&self) -> Result<AdminDashboardStats, sqlx::Error>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// The concrete implementation of the `Repository` trait, backed by PostgreSQL.
/// Dynamic filters use `QueryBuilder` (bind-parameterized throughout); cursor
/// pagination is keyset-based on the sort column plus id as tiebreaker, with
/// the cursor row included in the page it starts.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Column lists for joined appointment selects. `a.*` carries the row; the
// aliased columns feed the `#[sqlx(default)]` enrichment fields.
const APPOINTMENT_WITH_PSYCHOLOGIST: &str = r#"
    SELECT a.*,
           p.name AS psychologist_name,
           p.specialization AS psychologist_specialization,
           p.image_url AS psychologist_image_url
    FROM appointments a
    LEFT JOIN psychologists p ON a.psychologist_id = p.id
"#;

const APPOINTMENT_WITH_PATIENT: &str = r#"
    SELECT a.*,
           u.first_name || ' ' || u.last_name AS patient_name,
           u.email AS patient_email
    FROM appointments a
    JOIN users u ON a.user_id = u.id
"#;

#[async_trait]
impl Repository for PostgresRepository {
    // --- Users / Identity ---

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_user_by_kinde_id(&self, kinde_id: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE kinde_id = $1")
            .bind(kinde_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Insert-or-update keyed on the external identity id. Both the
    /// `user.created` and `user.updated` webhook events land here, so webhook
    /// redelivery is harmless.
    async fn upsert_user(
        &self,
        kinde_id: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
        image_url: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, kinde_id, email, first_name, last_name, image_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (kinde_id) DO UPDATE
                SET email = EXCLUDED.email,
                    first_name = EXCLUDED.first_name,
                    last_name = EXCLUDED.last_name,
                    image_url = EXCLUDED.image_url,
                    updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(kinde_id)
        .bind(email)
        .bind(first_name)
        .bind(last_name)
        .bind(image_url)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_user_by_kinde_id(&self, kinde_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE kinde_id = $1")
            .bind(kinde_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                image_url = COALESCE($4, image_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.first_name)
        .bind(req.last_name)
        .bind(req.image_url)
        .fetch_optional(&self.pool)
        .await
    }

    // --- Psychologists ---

    /// Public directory. Strictly enforces `is_active = true`; filters are
    /// case-insensitive specialization match and availability-day membership.
    async fn list_public_psychologists(
        &self,
        specialization: Option<String>,
        availability: Option<String>,
    ) -> Result<Vec<Psychologist>, sqlx::Error> {
        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT * FROM psychologists WHERE is_active = true ");

        if let Some(s) = specialization {
            builder.push(" AND specialization ILIKE ");
            builder.push_bind(format!("%{}%", s));
        }

        if let Some(day) = availability {
            builder.push(" AND ");
            builder.push_bind(day);
            builder.push(" = ANY(availability) ");
        }

        builder.push(" ORDER BY name ASC");

        builder
            .build_query_as::<Psychologist>()
            .fetch_all(&self.pool)
            .await
    }

    async fn shortlist_psychologists(&self, limit: i64) -> Result<Vec<Psychologist>, sqlx::Error> {
        sqlx::query_as::<_, Psychologist>(
            "SELECT * FROM psychologists WHERE is_active = true ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_psychologist(&self, id: Uuid) -> Result<Option<Psychologist>, sqlx::Error> {
        sqlx::query_as::<_, Psychologist>("SELECT * FROM psychologists WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_psychologist_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Psychologist>, sqlx::Error> {
        sqlx::query_as::<_, Psychologist>("SELECT * FROM psychologists WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_psychologists_admin(&self) -> Result<Vec<Psychologist>, sqlx::Error> {
        sqlx::query_as::<_, Psychologist>("SELECT * FROM psychologists ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
    }

    async fn create_psychologist(
        &self,
        req: CreatePsychologistRequest,
    ) -> Result<Psychologist, sqlx::Error> {
        sqlx::query_as::<_, Psychologist>(
            r#"
            INSERT INTO psychologists
                (id, user_id, name, specialization, bio, email, phone, image_url, availability, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(req.user_id)
        .bind(req.name)
        .bind(req.specialization)
        .bind(req.bio)
        .bind(req.email)
        .bind(req.phone)
        .bind(req.image_url)
        .bind(req.availability)
        .bind(req.is_active)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_psychologist(
        &self,
        id: Uuid,
        req: UpdatePsychologistRequest,
    ) -> Result<Option<Psychologist>, sqlx::Error> {
        sqlx::query_as::<_, Psychologist>(
            r#"
            UPDATE psychologists
            SET name = COALESCE($2, name),
                specialization = COALESCE($3, specialization),
                bio = COALESCE($4, bio),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                image_url = COALESCE($7, image_url),
                availability = COALESCE($8, availability),
                is_active = COALESCE($9, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.name)
        .bind(req.specialization)
        .bind(req.bio)
        .bind(req.email)
        .bind(req.phone)
        .bind(req.image_url)
        .bind(req.availability)
        .bind(req.is_active)
        .fetch_optional(&self.pool)
        .await
    }

    /// Deletes the profile. Appointment history survives: the FK is
    /// ON DELETE SET NULL, nothing cascades.
    async fn delete_psychologist(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM psychologists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Appointments ---

    async fn blocking_appointments(
        &self,
        psychologist_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, sqlx::Error> {
        sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            SELECT date FROM appointments
            WHERE psychologist_id = $1
              AND date >= $2 AND date < $3
              AND status IN ('PENDING', 'CONFIRMED')
            "#,
        )
        .bind(psychologist_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
    }

    /// book_appointment
    ///
    /// Single-statement insert racing against the `appointments_active_slot`
    /// partial unique index. A concurrent or prior booking of the same
    /// psychologist/timestamp makes the insert return no row, which the
    /// handler maps to CONFLICT. There is no separate existence check to
    /// race against.
    async fn book_appointment(
        &self,
        user_id: Uuid,
        req: BookAppointmentRequest,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let inserted = sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments (id, user_id, psychologist_id, date, duration_minutes, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (psychologist_id, date) WHERE status IN ('PENDING', 'CONFIRMED')
                DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(req.psychologist_id)
        .bind(req.date)
        .bind(req.duration_minutes.unwrap_or(60))
        .bind(req.notes)
        .fetch_optional(&self.pool)
        .await?;

        // Re-select with the psychologist summary joined in, so the booking
        // response matches the list shape.
        match inserted {
            Some(appointment) => self.get_appointment(appointment.id).await,
            None => Ok(None),
        }
    }

    async fn my_appointments(
        &self,
        user_id: Uuid,
        limit: i64,
        cursor: Option<Uuid>,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new(APPOINTMENT_WITH_PSYCHOLOGIST);
        builder.push(" WHERE a.user_id = ");
        builder.push_bind(user_id);

        if let Some(s) = status {
            builder.push(" AND a.status = ");
            builder.push_bind(s);
        }

        if let Some(c) = cursor {
            builder.push(" AND (a.date, a.id) <= (SELECT date, id FROM appointments WHERE id = ");
            builder.push_bind(c);
            builder.push(") ");
        }

        builder.push(" ORDER BY a.date DESC, a.id DESC LIMIT ");
        builder.push_bind(limit + 1);

        builder
            .build_query_as::<Appointment>()
            .fetch_all(&self.pool)
            .await
    }

    async fn get_appointment(&self, id: Uuid) -> Result<Option<Appointment>, sqlx::Error> {
        sqlx::query_as::<_, Appointment>(&format!(
            "{} WHERE a.id = $1",
            APPOINTMENT_WITH_PSYCHOLOGIST
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn set_appointment_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        sqlx::query_as::<_, Appointment>(
            "UPDATE appointments SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_appointment(
        &self,
        id: Uuid,
        req: UpdateAppointmentRequest,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        sqlx::query_as::<_, Appointment>(
            r#"
            UPDATE appointments
            SET status = $2,
                notes = COALESCE($3, notes),
                meeting_link = COALESCE($4, meeting_link),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.status)
        .bind(req.notes)
        .bind(req.meeting_link)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_appointments_admin(&self) -> Result<Vec<Appointment>, sqlx::Error> {
        // Admin overview wants both sides of the booking.
        sqlx::query_as::<_, Appointment>(
            r#"
            SELECT a.*,
                   p.name AS psychologist_name,
                   p.specialization AS psychologist_specialization,
                   p.image_url AS psychologist_image_url,
                   u.first_name || ' ' || u.last_name AS patient_name,
                   u.email AS patient_email
            FROM appointments a
            JOIN users u ON a.user_id = u.id
            LEFT JOIN psychologists p ON a.psychologist_id = p.id
            ORDER BY a.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    // --- Psychologist Portal ---

    async fn psychologist_stats(
        &self,
        psychologist_id: Uuid,
        today: (DateTime<Utc>, DateTime<Utc>),
        week: (DateTime<Utc>, DateTime<Utc>),
    ) -> Result<PsychologistDashboardStats, sqlx::Error> {
        let count_between = "SELECT COUNT(*) FROM appointments WHERE psychologist_id = $1 AND date >= $2 AND date < $3";

        let today_appointments = sqlx::query_scalar::<_, i64>(count_between)
            .bind(psychologist_id)
            .bind(today.0)
            .bind(today.1)
            .fetch_one(&self.pool)
            .await?;

        let week_appointments = sqlx::query_scalar::<_, i64>(count_between)
            .bind(psychologist_id)
            .bind(week.0)
            .bind(week.1)
            .fetch_one(&self.pool)
            .await?;

        let total_appointments = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM appointments WHERE psychologist_id = $1",
        )
        .bind(psychologist_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(PsychologistDashboardStats {
            today_appointments,
            week_appointments,
            total_appointments,
        })
    }

    async fn appointments_for_psychologist(
        &self,
        psychologist_id: Uuid,
        status: Option<AppointmentStatus>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(APPOINTMENT_WITH_PATIENT);
        builder.push(" WHERE a.psychologist_id = ");
        builder.push_bind(psychologist_id);

        if let Some(s) = status {
            builder.push(" AND a.status = ");
            builder.push_bind(s);
        }
        if let Some(f) = from {
            builder.push(" AND a.date >= ");
            builder.push_bind(f);
        }
        if let Some(t) = to {
            builder.push(" AND a.date <= ");
            builder.push_bind(t);
        }

        builder.push(" ORDER BY a.date DESC");

        builder
            .build_query_as::<Appointment>()
            .fetch_all(&self.pool)
            .await
    }

    async fn recent_appointments(
        &self,
        psychologist_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        sqlx::query_as::<_, Appointment>(&format!(
            "{} WHERE a.psychologist_id = $1 ORDER BY a.date DESC LIMIT $2",
            APPOINTMENT_WITH_PATIENT
        ))
        .bind(psychologist_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_psychologist_appointment(
        &self,
        id: Uuid,
        psychologist_id: Uuid,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        sqlx::query_as::<_, Appointment>(&format!(
            "{} WHERE a.id = $1 AND a.psychologist_id = $2",
            APPOINTMENT_WITH_PATIENT
        ))
        .bind(id)
        .bind(psychologist_id)
        .fetch_optional(&self.pool)
        .await
    }

    // --- Programs ---

    /// Public program listing, soonest first. Search spans title,
    /// description and location, case-insensitively.
    async fn list_programs(
        &self,
        limit: i64,
        cursor: Option<Uuid>,
        upcoming_only: bool,
        search: Option<String>,
    ) -> Result<Vec<Program>, sqlx::Error> {
        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT * FROM programs WHERE 1 = 1 ");

        if upcoming_only {
            builder.push(" AND is_upcoming = true ");
        }

        if let Some(s) = search {
            let pattern = format!("%{}%", s);
            builder.push(" AND (title ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR description ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR location ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }

        if let Some(c) = cursor {
            builder.push(" AND (date, id) >= (SELECT date, id FROM programs WHERE id = ");
            builder.push_bind(c);
            builder.push(") ");
        }

        builder.push(" ORDER BY date ASC, id ASC LIMIT ");
        builder.push_bind(limit + 1);

        builder
            .build_query_as::<Program>()
            .fetch_all(&self.pool)
            .await
    }

    async fn upcoming_programs(&self, limit: i64) -> Result<Vec<Program>, sqlx::Error> {
        sqlx::query_as::<_, Program>(
            "SELECT * FROM programs WHERE is_upcoming = true ORDER BY date ASC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_program(&self, id: Uuid) -> Result<Option<Program>, sqlx::Error> {
        sqlx::query_as::<_, Program>("SELECT * FROM programs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn program_registrations(
        &self,
        program_id: Uuid,
    ) -> Result<Vec<ProgramRegistration>, sqlx::Error> {
        sqlx::query_as::<_, ProgramRegistration>(
            r#"
            SELECT * FROM program_registrations
            WHERE program_id = $1 AND status = 'CONFIRMED'
            ORDER BY created_at ASC
            "#,
        )
        .bind(program_id)
        .fetch_all(&self.pool)
        .await
    }

    /// register_for_program
    ///
    /// All checks and the attendee-counter increment run inside one
    /// transaction with the program row locked, so two concurrent signups
    /// cannot both take the last seat. The (program_id, email) unique
    /// constraint catches duplicates regardless.
    async fn register_for_program(
        &self,
        program_id: Uuid,
        req: RegisterProgramRequest,
    ) -> Result<RegistrationOutcome, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let program = sqlx::query_as::<_, Program>("SELECT * FROM programs WHERE id = $1 FOR UPDATE")
            .bind(program_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(program) = program else {
            return Ok(RegistrationOutcome::ProgramNotFound);
        };

        if !program.is_upcoming {
            return Ok(RegistrationOutcome::RegistrationClosed);
        }

        if let Some(max) = program.max_attendees {
            if program.current_attendees >= max {
                return Ok(RegistrationOutcome::AtCapacity);
            }
        }

        let registration = sqlx::query_as::<_, ProgramRegistration>(
            r#"
            INSERT INTO program_registrations (id, program_id, name, email, phone)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (program_id, email) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(program_id)
        .bind(req.name)
        .bind(req.email)
        .bind(req.phone)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(registration) = registration else {
            return Ok(RegistrationOutcome::AlreadyRegistered);
        };

        sqlx::query(
            "UPDATE programs SET current_attendees = current_attendees + 1, updated_at = NOW() WHERE id = $1",
        )
        .bind(program_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(RegistrationOutcome::Registered(registration))
    }

    async fn list_programs_admin(&self) -> Result<Vec<Program>, sqlx::Error> {
        sqlx::query_as::<_, Program>("SELECT * FROM programs ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
    }

    async fn create_program(&self, req: CreateProgramRequest) -> Result<Program, sqlx::Error> {
        sqlx::query_as::<_, Program>(
            r#"
            INSERT INTO programs
                (id, title, description, content, image_url, video_url, date, location, is_upcoming, max_attendees)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(req.title)
        .bind(req.description)
        .bind(req.content)
        .bind(req.image_url)
        .bind(req.video_url)
        .bind(req.date)
        .bind(req.location)
        .bind(req.is_upcoming)
        .bind(req.max_attendees)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_program(
        &self,
        id: Uuid,
        req: UpdateProgramRequest,
    ) -> Result<Option<Program>, sqlx::Error> {
        sqlx::query_as::<_, Program>(
            r#"
            UPDATE programs
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                content = COALESCE($4, content),
                image_url = COALESCE($5, image_url),
                video_url = COALESCE($6, video_url),
                date = COALESCE($7, date),
                location = COALESCE($8, location),
                is_upcoming = COALESCE($9, is_upcoming),
                max_attendees = COALESCE($10, max_attendees),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.title)
        .bind(req.description)
        .bind(req.content)
        .bind(req.image_url)
        .bind(req.video_url)
        .bind(req.date)
        .bind(req.location)
        .bind(req.is_upcoming)
        .bind(req.max_attendees)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_program(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM programs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Resources ---

    /// Public resource listing. Strictly enforces `is_published = true`.
    async fn list_resources(
        &self,
        limit: i64,
        cursor: Option<Uuid>,
        category: Option<String>,
        search: Option<String>,
    ) -> Result<Vec<Resource>, sqlx::Error> {
        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT * FROM resources WHERE is_published = true ");

        if let Some(c) = category {
            builder.push(" AND category = ");
            builder.push_bind(c);
        }

        if let Some(s) = search {
            let pattern = format!("%{}%", s);
            builder.push(" AND (title ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR description ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR content ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }

        if let Some(c) = cursor {
            builder
                .push(" AND (created_at, id) <= (SELECT created_at, id FROM resources WHERE id = ");
            builder.push_bind(c);
            builder.push(") ");
        }

        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(limit + 1);

        builder
            .build_query_as::<Resource>()
            .fetch_all(&self.pool)
            .await
    }

    async fn featured_resources(&self, limit: i64) -> Result<Vec<Resource>, sqlx::Error> {
        sqlx::query_as::<_, Resource>(
            "SELECT * FROM resources WHERE is_published = true ORDER BY download_count DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn resource_categories(&self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT category FROM resources WHERE is_published = true ORDER BY category ASC",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_published_resource(&self, id: Uuid) -> Result<Option<Resource>, sqlx::Error> {
        sqlx::query_as::<_, Resource>(
            "SELECT * FROM resources WHERE id = $1 AND is_published = true",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn record_download(&self, id: Uuid) -> Result<Option<Resource>, sqlx::Error> {
        sqlx::query_as::<_, Resource>(
            r#"
            UPDATE resources
            SET download_count = download_count + 1
            WHERE id = $1 AND is_published = true
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_resources_admin(&self) -> Result<Vec<Resource>, sqlx::Error> {
        sqlx::query_as::<_, Resource>("SELECT * FROM resources ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
    }

    async fn create_resource(&self, req: CreateResourceRequest) -> Result<Resource, sqlx::Error> {
        sqlx::query_as::<_, Resource>(
            r#"
            INSERT INTO resources
                (id, title, description, content, image_url, download_url, category, file_size, file_type, is_published)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(req.title)
        .bind(req.description)
        .bind(req.content)
        .bind(req.image_url)
        .bind(req.download_url)
        .bind(req.category)
        .bind(req.file_size)
        .bind(req.file_type)
        .bind(req.is_published)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_resource(
        &self,
        id: Uuid,
        req: UpdateResourceRequest,
    ) -> Result<Option<Resource>, sqlx::Error> {
        sqlx::query_as::<_, Resource>(
            r#"
            UPDATE resources
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                content = COALESCE($4, content),
                image_url = COALESCE($5, image_url),
                download_url = COALESCE($6, download_url),
                category = COALESCE($7, category),
                file_size = COALESCE($8, file_size),
                file_type = COALESCE($9, file_type),
                is_published = COALESCE($10, is_published),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.title)
        .bind(req.description)
        .bind(req.content)
        .bind(req.image_url)
        .bind(req.download_url)
        .bind(req.category)
        .bind(req.file_size)
        .bind(req.file_type)
        .bind(req.is_published)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_resource(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- News ---

    /// Public news listing, newest publication first. Tag filtering is array
    /// membership; search spans title, summary and content.
    async fn list_news(
        &self,
        limit: i64,
        cursor: Option<Uuid>,
        search: Option<String>,
        tag: Option<String>,
    ) -> Result<Vec<NewsItem>, sqlx::Error> {
        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT * FROM news_items WHERE is_published = true ");

        if let Some(s) = search {
            let pattern = format!("%{}%", s);
            builder.push(" AND (title ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR summary ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR content ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }

        if let Some(t) = tag {
            builder.push(" AND ");
            builder.push_bind(t);
            builder.push(" = ANY(tags) ");
        }

        if let Some(c) = cursor {
            builder.push(
                " AND (published_at, id) <= (SELECT published_at, id FROM news_items WHERE id = ",
            );
            builder.push_bind(c);
            builder.push(") ");
        }

        builder.push(" ORDER BY published_at DESC, id DESC LIMIT ");
        builder.push_bind(limit + 1);

        builder
            .build_query_as::<NewsItem>()
            .fetch_all(&self.pool)
            .await
    }

    async fn latest_news(&self, limit: i64) -> Result<Vec<NewsItem>, sqlx::Error> {
        sqlx::query_as::<_, NewsItem>(
            "SELECT * FROM news_items WHERE is_published = true ORDER BY published_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_published_news(&self, id: Uuid) -> Result<Option<NewsItem>, sqlx::Error> {
        sqlx::query_as::<_, NewsItem>(
            "SELECT * FROM news_items WHERE id = $1 AND is_published = true",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_news_admin(&self) -> Result<Vec<NewsItem>, sqlx::Error> {
        sqlx::query_as::<_, NewsItem>("SELECT * FROM news_items ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
    }

    async fn create_news(&self, req: CreateNewsRequest) -> Result<NewsItem, sqlx::Error> {
        // Publishing on create stamps published_at immediately.
        sqlx::query_as::<_, NewsItem>(
            r#"
            INSERT INTO news_items
                (id, title, summary, content, image_url, author, tags, is_published, published_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, CASE WHEN $8 THEN NOW() END)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(req.title)
        .bind(req.summary)
        .bind(req.content)
        .bind(req.image_url)
        .bind(req.author)
        .bind(req.tags)
        .bind(req.is_published)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_news(
        &self,
        id: Uuid,
        req: UpdateNewsRequest,
    ) -> Result<Option<NewsItem>, sqlx::Error> {
        // Setting is_published=true (re-)stamps published_at; any other update
        // leaves the existing timestamp alone.
        sqlx::query_as::<_, NewsItem>(
            r#"
            UPDATE news_items
            SET title = COALESCE($2, title),
                summary = COALESCE($3, summary),
                content = COALESCE($4, content),
                image_url = COALESCE($5, image_url),
                author = COALESCE($6, author),
                tags = COALESCE($7, tags),
                is_published = COALESCE($8, is_published),
                published_at = CASE WHEN $8 IS TRUE THEN NOW() ELSE published_at END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.title)
        .bind(req.summary)
        .bind(req.content)
        .bind(req.image_url)
        .bind(req.author)
        .bind(req.tags)
        .bind(req.is_published)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_news(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM news_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Donations ---

    async fn create_donation(
        &self,
        user_id: Option<Uuid>,
        req: CreateDonationRequest,
    ) -> Result<Donation, sqlx::Error> {
        sqlx::query_as::<_, Donation>(
            r#"
            INSERT INTO donations
                (id, user_id, amount, currency, payment_method, donor_name, donor_email, is_anonymous, message)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(req.amount)
        .bind(req.currency)
        .bind(req.payment_method)
        .bind(req.donor_name)
        .bind(req.donor_email)
        .bind(req.is_anonymous)
        .bind(req.message)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_donation(&self, id: Uuid) -> Result<Option<Donation>, sqlx::Error> {
        sqlx::query_as::<_, Donation>("SELECT * FROM donations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn my_donations(
        &self,
        user_id: Uuid,
        limit: i64,
        cursor: Option<Uuid>,
    ) -> Result<Vec<Donation>, sqlx::Error> {
        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT * FROM donations WHERE user_id = ");
        builder.push_bind(user_id);

        if let Some(c) = cursor {
            builder
                .push(" AND (created_at, id) <= (SELECT created_at, id FROM donations WHERE id = ");
            builder.push_bind(c);
            builder.push(") ");
        }

        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(limit + 1);

        builder
            .build_query_as::<Donation>()
            .fetch_all(&self.pool)
            .await
    }

    async fn recent_donations(
        &self,
        limit: i64,
        cursor: Option<Uuid>,
    ) -> Result<Vec<Donation>, sqlx::Error> {
        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(
            r#"
            SELECT d.*,
                   u.email AS user_email,
                   u.first_name || ' ' || u.last_name AS user_name
            FROM donations d
            LEFT JOIN users u ON d.user_id = u.id
            WHERE 1 = 1
            "#,
        );

        if let Some(c) = cursor {
            builder.push(
                " AND (d.created_at, d.id) <= (SELECT created_at, id FROM donations WHERE id = ",
            );
            builder.push_bind(c);
            builder.push(") ");
        }

        builder.push(" ORDER BY d.created_at DESC, d.id DESC LIMIT ");
        builder.push_bind(limit + 1);

        builder
            .build_query_as::<Donation>()
            .fetch_all(&self.pool)
            .await
    }

    async fn update_donation_status(
        &self,
        id: Uuid,
        req: UpdateDonationStatusRequest,
    ) -> Result<Option<Donation>, sqlx::Error> {
        sqlx::query_as::<_, Donation>(
            r#"
            UPDATE donations
            SET status = $2,
                transaction_id = COALESCE($3, transaction_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.status)
        .bind(req.transaction_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Compiles the donation counters for the admin dashboard in one round
    /// trip. The amount total only counts COMPLETED donations.
    async fn donation_stats(&self) -> Result<DonationStats, sqlx::Error> {
        let row: (i64, f64, i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COALESCE(SUM(amount) FILTER (WHERE status = 'COMPLETED'), 0),
                   COUNT(*) FILTER (WHERE status = 'COMPLETED'),
                   COUNT(*) FILTER (WHERE status = 'PENDING')
            FROM donations
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(DonationStats {
            total_donations: row.0,
            total_amount: row.1,
            completed_donations: row.2,
            pending_donations: row.3,
        })
    }

    // --- Testimonials ---

    async fn approved_testimonials(&self) -> Result<Vec<Testimonial>, sqlx::Error> {
        sqlx::query_as::<_, Testimonial>(
            "SELECT * FROM testimonials WHERE is_approved = true ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_approved_testimonial(
        &self,
        id: Uuid,
    ) -> Result<Option<Testimonial>, sqlx::Error> {
        sqlx::query_as::<_, Testimonial>(
            "SELECT * FROM testimonials WHERE id = $1 AND is_approved = true",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// New submissions always start unapproved, whatever the client sends.
    async fn submit_testimonial(
        &self,
        req: SubmitTestimonialRequest,
    ) -> Result<Testimonial, sqlx::Error> {
        sqlx::query_as::<_, Testimonial>(
            r#"
            INSERT INTO testimonials (id, name, role, content, image_url, rating, is_approved)
            VALUES ($1, $2, $3, $4, $5, $6, false)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(req.name)
        .bind(req.role)
        .bind(req.content)
        .bind(req.image_url)
        .bind(req.rating)
        .fetch_one(&self.pool)
        .await
    }

    async fn list_testimonials_admin(
        &self,
        limit: i64,
        cursor: Option<Uuid>,
        approved: Option<bool>,
    ) -> Result<Vec<Testimonial>, sqlx::Error> {
        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT * FROM testimonials WHERE 1 = 1 ");

        if let Some(a) = approved {
            builder.push(" AND is_approved = ");
            builder.push_bind(a);
        }

        if let Some(c) = cursor {
            builder.push(
                " AND (created_at, id) <= (SELECT created_at, id FROM testimonials WHERE id = ",
            );
            builder.push_bind(c);
            builder.push(") ");
        }

        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(limit + 1);

        builder
            .build_query_as::<Testimonial>()
            .fetch_all(&self.pool)
            .await
    }

    async fn approve_testimonial(&self, id: Uuid) -> Result<Option<Testimonial>, sqlx::Error> {
        sqlx::query_as::<_, Testimonial>(
            "UPDATE testimonials SET is_approved = true, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_testimonial(
        &self,
        id: Uuid,
        req: UpdateTestimonialRequest,
    ) -> Result<Option<Testimonial>, sqlx::Error> {
        sqlx::query_as::<_, Testimonial>(
            r#"
            UPDATE testimonials
            SET name = COALESCE($2, name),
                role = COALESCE($3, role),
                content = COALESCE($4, content),
                image_url = COALESCE($5, image_url),
                rating = COALESCE($6, rating),
                is_approved = COALESCE($7, is_approved),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.name)
        .bind(req.role)
        .bind(req.content)
        .bind(req.image_url)
        .bind(req.rating)
        .bind(req.is_approved)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_testimonial(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Partners ---

    async fn active_partners(&self) -> Result<Vec<Partner>, sqlx::Error> {
        sqlx::query_as::<_, Partner>(
            "SELECT * FROM partners WHERE is_active = true ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_active_partner(&self, id: Uuid) -> Result<Option<Partner>, sqlx::Error> {
        sqlx::query_as::<_, Partner>("SELECT * FROM partners WHERE id = $1 AND is_active = true")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_partners_admin(&self) -> Result<Vec<Partner>, sqlx::Error> {
        sqlx::query_as::<_, Partner>("SELECT * FROM partners ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
    }

    async fn create_partner(&self, req: CreatePartnerRequest) -> Result<Partner, sqlx::Error> {
        sqlx::query_as::<_, Partner>(
            r#"
            INSERT INTO partners (id, name, description, logo_url, website_url, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(req.name)
        .bind(req.description)
        .bind(req.logo_url)
        .bind(req.website_url)
        .bind(req.is_active)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_partner(
        &self,
        id: Uuid,
        req: UpdatePartnerRequest,
    ) -> Result<Option<Partner>, sqlx::Error> {
        sqlx::query_as::<_, Partner>(
            r#"
            UPDATE partners
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                logo_url = COALESCE($4, logo_url),
                website_url = COALESCE($5, website_url),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.name)
        .bind(req.description)
        .bind(req.logo_url)
        .bind(req.website_url)
        .bind(req.is_active)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_partner(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM partners WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Contact ---

    async fn submit_contact(
        &self,
        req: SubmitContactRequest,
    ) -> Result<ContactSubmission, sqlx::Error> {
        sqlx::query_as::<_, ContactSubmission>(
            r#"
            INSERT INTO contact_submissions (id, name, email, phone, subject, message)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(req.name)
        .bind(req.email)
        .bind(req.phone)
        .bind(req.subject)
        .bind(req.message)
        .fetch_one(&self.pool)
        .await
    }

    async fn list_contact_submissions(
        &self,
        limit: i64,
        cursor: Option<Uuid>,
        status: Option<crate::models::ContactStatus>,
        search: Option<String>,
    ) -> Result<Vec<ContactSubmission>, sqlx::Error> {
        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT * FROM contact_submissions WHERE 1 = 1 ");

        if let Some(s) = status {
            builder.push(" AND status = ");
            builder.push_bind(s);
        }

        if let Some(s) = search {
            let pattern = format!("%{}%", s);
            builder.push(" AND (name ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR email ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR subject ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR message ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }

        if let Some(c) = cursor {
            builder.push(
                " AND (created_at, id) <= (SELECT created_at, id FROM contact_submissions WHERE id = ",
            );
            builder.push_bind(c);
            builder.push(") ");
        }

        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(limit + 1);

        builder
            .build_query_as::<ContactSubmission>()
            .fetch_all(&self.pool)
            .await
    }

    async fn get_contact_submission(
        &self,
        id: Uuid,
    ) -> Result<Option<ContactSubmission>, sqlx::Error> {
        sqlx::query_as::<_, ContactSubmission>("SELECT * FROM contact_submissions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update_contact_status(
        &self,
        id: Uuid,
        req: UpdateContactStatusRequest,
    ) -> Result<Option<ContactSubmission>, sqlx::Error> {
        sqlx::query_as::<_, ContactSubmission>(
            r#"
            UPDATE contact_submissions
            SET status = $2,
                response = COALESCE($3, response),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.status)
        .bind(req.response)
        .fetch_optional(&self.pool)
        .await
    }

    async fn contact_stats(&self) -> Result<ContactStats, sqlx::Error> {
        let row: (i64, i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE status = 'NEW'),
                   COUNT(*) FILTER (WHERE status = 'IN_PROGRESS'),
                   COUNT(*) FILTER (WHERE status = 'RESOLVED'),
                   COUNT(*) FILTER (WHERE status = 'CLOSED')
            FROM contact_submissions
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(ContactStats {
            total: row.0,
            new: row.1,
            in_progress: row.2,
            resolved: row.3,
            closed: row.4,
        })
    }

    // --- Admin Dashboard ---

    /// Entity counters for the admin landing page, one scalar query each
    /// (mirrors the dashboard the admin UI renders).
    async fn admin_stats(&self) -> Result<AdminDashboardStats, sqlx::Error> {
        let programs = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM programs")
            .fetch_one(&self.pool)
            .await?;
        let resources = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM resources")
            .fetch_one(&self.pool)
            .await?;
        let news = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM news_items")
            .fetch_one(&self.pool)
            .await?;
        let psychologists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM psychologists")
            .fetch_one(&self.pool)
            .await?;
        let appointments = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM appointments")
            .fetch_one(&self.pool)
            .await?;

        Ok(AdminDashboardStats {
            programs,
            resources,
            news,
            psychologists,
            appointments,
        })
    }
}
