use async_trait::async_trait;
use calme_portal::{
    AppConfig, AppState,
    models::{
        AdminDashboardStats, Appointment, AppointmentStatus, BookAppointmentRequest, ContactStats,
        ContactStatus, ContactSubmission, CreateDonationRequest, CreateNewsRequest,
        CreatePartnerRequest, CreateProgramRequest, CreatePsychologistRequest,
        CreateResourceRequest, Donation, DonationStats, NewsItem, Partner, Program,
        ProgramRegistration, Psychologist, PsychologistDashboardStats, RegisterProgramRequest,
        Resource, SubmitContactRequest, SubmitTestimonialRequest, Testimonial,
        UpdateAppointmentRequest, UpdateContactStatusRequest, UpdateDonationStatusRequest,
        UpdateNewsRequest, UpdatePartnerRequest, UpdateProfileRequest, UpdateProgramRequest,
        UpdatePsychologistRequest, UpdateResourceRequest, UpdateTestimonialRequest, User,
    },
    repository::{RegistrationOutcome, Repository},
};
use chrono::{DateTime, Utc};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use uuid::Uuid;

// --- MOCK REPOSITORY IMPLEMENTATION ---

// Central control point for handler tests. Handlers depend on the Repository
// trait, so the mock pre-cans every read and records every mutation; the
// `mutations` counter backs the "no data mutation occurs" ACL assertions.
pub struct MockRepo {
    pub user_to_return: Option<User>,
    pub psychologist_to_return: Option<Psychologist>,
    pub psychologists_to_return: Vec<Psychologist>,
    pub appointment_to_return: Option<Appointment>,
    pub appointments_to_return: Vec<Appointment>,
    // None simulates a taken slot (conflict).
    pub booking_result: Option<Appointment>,
    pub blocking_times: Vec<DateTime<Utc>>,
    pub program_to_return: Option<Program>,
    pub programs_to_return: Vec<Program>,
    pub registration_outcome: RegistrationOutcome,
    pub resource_to_return: Option<Resource>,
    pub resources_to_return: Vec<Resource>,
    pub news_item_to_return: Option<NewsItem>,
    pub news_to_return: Vec<NewsItem>,
    pub donation_to_return: Option<Donation>,
    pub donations_to_return: Vec<Donation>,
    pub testimonial_to_return: Option<Testimonial>,
    pub testimonials_to_return: Vec<Testimonial>,
    pub partner_to_return: Option<Partner>,
    pub partners_to_return: Vec<Partner>,
    pub contact_to_return: Option<ContactSubmission>,
    pub contacts_to_return: Vec<ContactSubmission>,
    pub delete_result: bool,

    // Mutation bookkeeping.
    pub mutations: AtomicUsize,
    pub upserted_users: Mutex<Vec<(String, String)>>,
    pub deleted_kinde_ids: Mutex<Vec<String>>,
}

impl Default for MockRepo {
    fn default() -> Self {
        MockRepo {
            user_to_return: None,
            psychologist_to_return: Some(Psychologist::default()),
            psychologists_to_return: vec![],
            appointment_to_return: None,
            appointments_to_return: vec![],
            booking_result: Some(Appointment::default()),
            blocking_times: vec![],
            program_to_return: Some(Program::default()),
            programs_to_return: vec![],
            registration_outcome: RegistrationOutcome::ProgramNotFound,
            resource_to_return: Some(Resource::default()),
            resources_to_return: vec![],
            news_item_to_return: Some(NewsItem::default()),
            news_to_return: vec![],
            donation_to_return: Some(Donation::default()),
            donations_to_return: vec![],
            testimonial_to_return: Some(Testimonial::default()),
            testimonials_to_return: vec![],
            partner_to_return: Some(Partner::default()),
            partners_to_return: vec![],
            contact_to_return: Some(ContactSubmission::default()),
            contacts_to_return: vec![],
            delete_result: true,
            mutations: AtomicUsize::new(0),
            upserted_users: Mutex::new(vec![]),
            deleted_kinde_ids: Mutex::new(vec![]),
        }
    }
}

impl MockRepo {
    pub fn mutation_count(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    fn record_mutation(&self) {
        self.mutations.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Repository for MockRepo {
    // --- Users / Identity ---
    async fn get_user(&self, _id: Uuid) -> Result<Option<User>, sqlx::Error> {
        Ok(self.user_to_return.clone())
    }
    async fn get_user_by_kinde_id(&self, _kinde_id: &str) -> Result<Option<User>, sqlx::Error> {
        Ok(self.user_to_return.clone())
    }
    async fn upsert_user(
        &self,
        kinde_id: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
        image_url: &str,
    ) -> Result<User, sqlx::Error> {
        self.record_mutation();
        self.upserted_users
            .lock()
            .unwrap()
            .push((kinde_id.to_string(), email.to_string()));
        Ok(User {
            id: Uuid::new_v4(),
            kinde_id: kinde_id.to_string(),
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            image_url: image_url.to_string(),
            ..User::default()
        })
    }
    async fn delete_user_by_kinde_id(&self, kinde_id: &str) -> Result<bool, sqlx::Error> {
        self.record_mutation();
        self.deleted_kinde_ids
            .lock()
            .unwrap()
            .push(kinde_id.to_string());
        Ok(self.delete_result)
    }
    async fn update_profile(
        &self,
        _id: Uuid,
        _req: UpdateProfileRequest,
    ) -> Result<Option<User>, sqlx::Error> {
        self.record_mutation();
        Ok(self.user_to_return.clone())
    }

    // --- Psychologists ---
    async fn list_public_psychologists(
        &self,
        _specialization: Option<String>,
        _availability: Option<String>,
    ) -> Result<Vec<Psychologist>, sqlx::Error> {
        Ok(self.psychologists_to_return.clone())
    }
    async fn shortlist_psychologists(&self, _limit: i64) -> Result<Vec<Psychologist>, sqlx::Error> {
        Ok(self.psychologists_to_return.clone())
    }
    async fn get_psychologist(&self, _id: Uuid) -> Result<Option<Psychologist>, sqlx::Error> {
        Ok(self.psychologist_to_return.clone())
    }
    async fn get_psychologist_by_user(
        &self,
        _user_id: Uuid,
    ) -> Result<Option<Psychologist>, sqlx::Error> {
        Ok(self.psychologist_to_return.clone())
    }
    async fn list_psychologists_admin(&self) -> Result<Vec<Psychologist>, sqlx::Error> {
        Ok(self.psychologists_to_return.clone())
    }
    async fn create_psychologist(
        &self,
        _req: CreatePsychologistRequest,
    ) -> Result<Psychologist, sqlx::Error> {
        self.record_mutation();
        Ok(self.psychologist_to_return.clone().unwrap_or_default())
    }
    async fn update_psychologist(
        &self,
        _id: Uuid,
        _req: UpdatePsychologistRequest,
    ) -> Result<Option<Psychologist>, sqlx::Error> {
        self.record_mutation();
        Ok(self.psychologist_to_return.clone())
    }
    async fn delete_psychologist(&self, _id: Uuid) -> Result<bool, sqlx::Error> {
        self.record_mutation();
        Ok(self.delete_result)
    }

    // --- Appointments ---
    async fn blocking_appointments(
        &self,
        _psychologist_id: Uuid,
        _from: DateTime<Utc>,
        _to: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, sqlx::Error> {
        Ok(self.blocking_times.clone())
    }
    async fn book_appointment(
        &self,
        _user_id: Uuid,
        _req: BookAppointmentRequest,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        self.record_mutation();
        Ok(self.booking_result.clone())
    }
    async fn my_appointments(
        &self,
        _user_id: Uuid,
        _limit: i64,
        _cursor: Option<Uuid>,
        _status: Option<AppointmentStatus>,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        Ok(self.appointments_to_return.clone())
    }
    async fn get_appointment(&self, _id: Uuid) -> Result<Option<Appointment>, sqlx::Error> {
        Ok(self.appointment_to_return.clone())
    }
    async fn set_appointment_status(
        &self,
        _id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        self.record_mutation();
        Ok(self.appointment_to_return.clone().map(|mut a| {
            a.status = status;
            a
        }))
    }
    async fn update_appointment(
        &self,
        _id: Uuid,
        req: UpdateAppointmentRequest,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        self.record_mutation();
        Ok(self.appointment_to_return.clone().map(|mut a| {
            a.status = req.status;
            a
        }))
    }
    async fn list_appointments_admin(&self) -> Result<Vec<Appointment>, sqlx::Error> {
        Ok(self.appointments_to_return.clone())
    }

    // --- Psychologist Portal ---
    async fn psychologist_stats(
        &self,
        _psychologist_id: Uuid,
        _today: (DateTime<Utc>, DateTime<Utc>),
        _week: (DateTime<Utc>, DateTime<Utc>),
    ) -> Result<PsychologistDashboardStats, sqlx::Error> {
        Ok(PsychologistDashboardStats::default())
    }
    async fn appointments_for_psychologist(
        &self,
        _psychologist_id: Uuid,
        _status: Option<AppointmentStatus>,
        _from: Option<DateTime<Utc>>,
        _to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        Ok(self.appointments_to_return.clone())
    }
    async fn recent_appointments(
        &self,
        _psychologist_id: Uuid,
        _limit: i64,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        Ok(self.appointments_to_return.clone())
    }
    async fn get_psychologist_appointment(
        &self,
        _id: Uuid,
        _psychologist_id: Uuid,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        Ok(self.appointment_to_return.clone())
    }

    // --- Programs ---
    async fn list_programs(
        &self,
        _limit: i64,
        _cursor: Option<Uuid>,
        _upcoming_only: bool,
        _search: Option<String>,
    ) -> Result<Vec<Program>, sqlx::Error> {
        Ok(self.programs_to_return.clone())
    }
    async fn upcoming_programs(&self, _limit: i64) -> Result<Vec<Program>, sqlx::Error> {
        Ok(self.programs_to_return.clone())
    }
    async fn get_program(&self, _id: Uuid) -> Result<Option<Program>, sqlx::Error> {
        Ok(self.program_to_return.clone())
    }
    async fn program_registrations(
        &self,
        _program_id: Uuid,
    ) -> Result<Vec<ProgramRegistration>, sqlx::Error> {
        Ok(vec![])
    }
    async fn register_for_program(
        &self,
        _program_id: Uuid,
        _req: RegisterProgramRequest,
    ) -> Result<RegistrationOutcome, sqlx::Error> {
        self.record_mutation();
        Ok(self.registration_outcome.clone())
    }
    async fn list_programs_admin(&self) -> Result<Vec<Program>, sqlx::Error> {
        Ok(self.programs_to_return.clone())
    }
    async fn create_program(&self, _req: CreateProgramRequest) -> Result<Program, sqlx::Error> {
        self.record_mutation();
        Ok(self.program_to_return.clone().unwrap_or_default())
    }
    async fn update_program(
        &self,
        _id: Uuid,
        _req: UpdateProgramRequest,
    ) -> Result<Option<Program>, sqlx::Error> {
        self.record_mutation();
        Ok(self.program_to_return.clone())
    }
    async fn delete_program(&self, _id: Uuid) -> Result<bool, sqlx::Error> {
        self.record_mutation();
        Ok(self.delete_result)
    }

    // --- Resources ---
    async fn list_resources(
        &self,
        _limit: i64,
        _cursor: Option<Uuid>,
        _category: Option<String>,
        _search: Option<String>,
    ) -> Result<Vec<Resource>, sqlx::Error> {
        Ok(self.resources_to_return.clone())
    }
    async fn featured_resources(&self, _limit: i64) -> Result<Vec<Resource>, sqlx::Error> {
        Ok(self.resources_to_return.clone())
    }
    async fn resource_categories(&self) -> Result<Vec<String>, sqlx::Error> {
        Ok(vec![])
    }
    async fn get_published_resource(&self, _id: Uuid) -> Result<Option<Resource>, sqlx::Error> {
        Ok(self.resource_to_return.clone())
    }
    async fn record_download(&self, _id: Uuid) -> Result<Option<Resource>, sqlx::Error> {
        self.record_mutation();
        Ok(self.resource_to_return.clone())
    }
    async fn list_resources_admin(&self) -> Result<Vec<Resource>, sqlx::Error> {
        Ok(self.resources_to_return.clone())
    }
    async fn create_resource(&self, _req: CreateResourceRequest) -> Result<Resource, sqlx::Error> {
        self.record_mutation();
        Ok(self.resource_to_return.clone().unwrap_or_default())
    }
    async fn update_resource(
        &self,
        _id: Uuid,
        _req: UpdateResourceRequest,
    ) -> Result<Option<Resource>, sqlx::Error> {
        self.record_mutation();
        Ok(self.resource_to_return.clone())
    }
    async fn delete_resource(&self, _id: Uuid) -> Result<bool, sqlx::Error> {
        self.record_mutation();
        Ok(self.delete_result)
    }

    // --- News ---
    async fn list_news(
        &self,
        _limit: i64,
        _cursor: Option<Uuid>,
        _search: Option<String>,
        _tag: Option<String>,
    ) -> Result<Vec<NewsItem>, sqlx::Error> {
        Ok(self.news_to_return.clone())
    }
    async fn latest_news(&self, _limit: i64) -> Result<Vec<NewsItem>, sqlx::Error> {
        Ok(self.news_to_return.clone())
    }
    async fn get_published_news(&self, _id: Uuid) -> Result<Option<NewsItem>, sqlx::Error> {
        Ok(self.news_item_to_return.clone())
    }
    async fn list_news_admin(&self) -> Result<Vec<NewsItem>, sqlx::Error> {
        Ok(self.news_to_return.clone())
    }
    async fn create_news(&self, _req: CreateNewsRequest) -> Result<NewsItem, sqlx::Error> {
        self.record_mutation();
        Ok(self.news_item_to_return.clone().unwrap_or_default())
    }
    async fn update_news(
        &self,
        _id: Uuid,
        _req: UpdateNewsRequest,
    ) -> Result<Option<NewsItem>, sqlx::Error> {
        self.record_mutation();
        Ok(self.news_item_to_return.clone())
    }
    async fn delete_news(&self, _id: Uuid) -> Result<bool, sqlx::Error> {
        self.record_mutation();
        Ok(self.delete_result)
    }

    // --- Donations ---
    async fn create_donation(
        &self,
        user_id: Option<Uuid>,
        req: CreateDonationRequest,
    ) -> Result<Donation, sqlx::Error> {
        self.record_mutation();
        Ok(Donation {
            id: Uuid::new_v4(),
            user_id,
            amount: req.amount,
            currency: req.currency,
            payment_method: req.payment_method,
            donor_name: req.donor_name,
            donor_email: req.donor_email,
            is_anonymous: req.is_anonymous,
            message: req.message,
            ..Donation::default()
        })
    }
    async fn get_donation(&self, _id: Uuid) -> Result<Option<Donation>, sqlx::Error> {
        Ok(self.donation_to_return.clone())
    }
    async fn my_donations(
        &self,
        _user_id: Uuid,
        _limit: i64,
        _cursor: Option<Uuid>,
    ) -> Result<Vec<Donation>, sqlx::Error> {
        Ok(self.donations_to_return.clone())
    }
    async fn recent_donations(
        &self,
        _limit: i64,
        _cursor: Option<Uuid>,
    ) -> Result<Vec<Donation>, sqlx::Error> {
        Ok(self.donations_to_return.clone())
    }
    async fn update_donation_status(
        &self,
        _id: Uuid,
        req: UpdateDonationStatusRequest,
    ) -> Result<Option<Donation>, sqlx::Error> {
        self.record_mutation();
        Ok(self.donation_to_return.clone().map(|mut d| {
            d.status = req.status;
            d.transaction_id = req.transaction_id.or(d.transaction_id);
            d
        }))
    }
    async fn donation_stats(&self) -> Result<DonationStats, sqlx::Error> {
        Ok(DonationStats::default())
    }

    // --- Testimonials ---
    async fn approved_testimonials(&self) -> Result<Vec<Testimonial>, sqlx::Error> {
        Ok(self.testimonials_to_return.clone())
    }
    async fn get_approved_testimonial(
        &self,
        _id: Uuid,
    ) -> Result<Option<Testimonial>, sqlx::Error> {
        Ok(self.testimonial_to_return.clone())
    }
    async fn submit_testimonial(
        &self,
        _req: SubmitTestimonialRequest,
    ) -> Result<Testimonial, sqlx::Error> {
        self.record_mutation();
        Ok(self.testimonial_to_return.clone().unwrap_or_default())
    }
    async fn list_testimonials_admin(
        &self,
        _limit: i64,
        _cursor: Option<Uuid>,
        _approved: Option<bool>,
    ) -> Result<Vec<Testimonial>, sqlx::Error> {
        Ok(self.testimonials_to_return.clone())
    }
    async fn approve_testimonial(&self, _id: Uuid) -> Result<Option<Testimonial>, sqlx::Error> {
        self.record_mutation();
        Ok(self.testimonial_to_return.clone())
    }
    async fn update_testimonial(
        &self,
        _id: Uuid,
        _req: UpdateTestimonialRequest,
    ) -> Result<Option<Testimonial>, sqlx::Error> {
        self.record_mutation();
        Ok(self.testimonial_to_return.clone())
    }
    async fn delete_testimonial(&self, _id: Uuid) -> Result<bool, sqlx::Error> {
        self.record_mutation();
        Ok(self.delete_result)
    }

    // --- Partners ---
    async fn active_partners(&self) -> Result<Vec<Partner>, sqlx::Error> {
        Ok(self.partners_to_return.clone())
    }
    async fn get_active_partner(&self, _id: Uuid) -> Result<Option<Partner>, sqlx::Error> {
        Ok(self.partner_to_return.clone())
    }
    async fn list_partners_admin(&self) -> Result<Vec<Partner>, sqlx::Error> {
        Ok(self.partners_to_return.clone())
    }
    async fn create_partner(&self, _req: CreatePartnerRequest) -> Result<Partner, sqlx::Error> {
        self.record_mutation();
        Ok(self.partner_to_return.clone().unwrap_or_default())
    }
    async fn update_partner(
        &self,
        _id: Uuid,
        _req: UpdatePartnerRequest,
    ) -> Result<Option<Partner>, sqlx::Error> {
        self.record_mutation();
        Ok(self.partner_to_return.clone())
    }
    async fn delete_partner(&self, _id: Uuid) -> Result<bool, sqlx::Error> {
        self.record_mutation();
        Ok(self.delete_result)
    }

    // --- Contact ---
    async fn submit_contact(
        &self,
        _req: SubmitContactRequest,
    ) -> Result<ContactSubmission, sqlx::Error> {
        self.record_mutation();
        Ok(self.contact_to_return.clone().unwrap_or_default())
    }
    async fn list_contact_submissions(
        &self,
        _limit: i64,
        _cursor: Option<Uuid>,
        _status: Option<ContactStatus>,
        _search: Option<String>,
    ) -> Result<Vec<ContactSubmission>, sqlx::Error> {
        Ok(self.contacts_to_return.clone())
    }
    async fn get_contact_submission(
        &self,
        _id: Uuid,
    ) -> Result<Option<ContactSubmission>, sqlx::Error> {
        Ok(self.contact_to_return.clone())
    }
    async fn update_contact_status(
        &self,
        _id: Uuid,
        _req: UpdateContactStatusRequest,
    ) -> Result<Option<ContactSubmission>, sqlx::Error> {
        self.record_mutation();
        Ok(self.contact_to_return.clone())
    }
    async fn contact_stats(&self) -> Result<ContactStats, sqlx::Error> {
        Ok(ContactStats::default())
    }

    // --- Admin Dashboard ---
    async fn admin_stats(&self) -> Result<AdminDashboardStats, sqlx::Error> {
        Ok(AdminDashboardStats::default())
    }
}

// --- TEST UTILITIES ---

pub const TEST_ID: Uuid = Uuid::from_u128(123);
pub const TEST_ADMIN_ID: Uuid = Uuid::from_u128(456);

/// Creates an AppState over the given mock, keeping a handle to inspect
/// recorded calls afterwards.
pub fn create_test_state(repo: MockRepo) -> (AppState, Arc<MockRepo>) {
    let repo = Arc::new(repo);
    let state = AppState {
        repo: repo.clone(),
        config: AppConfig::default(),
    };
    (state, repo)
}

/// A user row for the mock to resolve, with the given role.
pub fn user_with_role(role: &str) -> User {
    User {
        id: TEST_ID,
        kinde_id: "kinde|test-user".to_string(),
        email: "test@calme.example".to_string(),
        role: role.to_string(),
        ..User::default()
    }
}

pub fn admin_user() -> calme_portal::auth::AuthUser {
    calme_portal::auth::AuthUser {
        id: TEST_ADMIN_ID,
        role: "ADMIN".to_string(),
    }
}

pub fn regular_user() -> calme_portal::auth::AuthUser {
    calme_portal::auth::AuthUser {
        id: TEST_ID,
        role: "USER".to_string(),
    }
}

pub fn psychologist_user() -> calme_portal::auth::AuthUser {
    calme_portal::auth::AuthUser {
        id: TEST_ID,
        role: "PSYCHOLOGIST".to_string(),
    }
}
