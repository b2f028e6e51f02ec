mod common;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use calme_portal::{
    ApiError,
    handlers::{self, appointments::AppointmentFilter, programs::ProgramFilter},
    models::{
        Appointment, AppointmentStatus, BookAppointmentRequest, CreateProgramRequest, Page,
        Program, SubmitContactRequest, SubmitTestimonialRequest, UpdateAppointmentRequest,
    },
    repository::RegistrationOutcome,
};
use chrono::Utc;
use common::{MockRepo, TEST_ID, admin_user, create_test_state, psychologist_user, regular_user};
use tokio::test;
use uuid::Uuid;

fn assert_error(err: ApiError, code: &str) {
    assert_eq!(err.code(), code);
}

// --- ACL: non-admin callers are rejected and nothing mutates ---

#[test]
async fn test_admin_stats_forbidden_for_regular_user() {
    let (state, repo) = create_test_state(MockRepo::default());

    let result = handlers::admin::get_admin_stats(regular_user(), State(state)).await;

    assert_error(result.unwrap_err(), "FORBIDDEN");
    assert_eq!(repo.mutation_count(), 0);
}

#[test]
async fn test_create_program_forbidden_for_regular_user() {
    let (state, repo) = create_test_state(MockRepo::default());

    let payload = CreateProgramRequest {
        title: "Mindfulness 101".to_string(),
        description: "Eight-week group".to_string(),
        content: None,
        image_url: None,
        video_url: None,
        date: Utc::now(),
        location: "Main clinic".to_string(),
        is_upcoming: true,
        max_attendees: Some(12),
    };

    let result =
        handlers::programs::create_program(regular_user(), State(state), Json(payload)).await;

    assert_error(result.unwrap_err(), "FORBIDDEN");
    // The repository must not have been touched.
    assert_eq!(repo.mutation_count(), 0);
}

#[test]
async fn test_delete_psychologist_forbidden_for_psychologist_role() {
    // PSYCHOLOGIST is staff, but not admin: content CRUD stays closed.
    let (state, repo) = create_test_state(MockRepo::default());

    let result =
        handlers::psychologists::delete_psychologist(psychologist_user(), State(state), Path(TEST_ID))
            .await;

    assert_error(result.unwrap_err(), "FORBIDDEN");
    assert_eq!(repo.mutation_count(), 0);
}

#[test]
async fn test_update_appointment_forbidden_for_regular_user() {
    let (state, repo) = create_test_state(MockRepo::default());

    let payload = UpdateAppointmentRequest {
        status: AppointmentStatus::Confirmed,
        notes: None,
        meeting_link: None,
    };

    let result = handlers::appointments::update_appointment(
        regular_user(),
        State(state),
        Path(TEST_ID),
        Json(payload),
    )
    .await;

    assert_error(result.unwrap_err(), "FORBIDDEN");
    assert_eq!(repo.mutation_count(), 0);
}

#[test]
async fn test_update_appointment_allowed_for_psychologist_role() {
    let (state, _repo) = create_test_state(MockRepo {
        appointment_to_return: Some(Appointment::default()),
        ..MockRepo::default()
    });

    let payload = UpdateAppointmentRequest {
        status: AppointmentStatus::Completed,
        notes: Some("Session held".to_string()),
        meeting_link: None,
    };

    let result = handlers::appointments::update_appointment(
        psychologist_user(),
        State(state),
        Path(TEST_ID),
        Json(payload),
    )
    .await;

    let Json(updated) = result.unwrap();
    assert_eq!(updated.status, AppointmentStatus::Completed);
}

#[test]
async fn test_admin_programs_success_for_admin() {
    let (state, _repo) = create_test_state(MockRepo {
        programs_to_return: vec![Program::default()],
        ..MockRepo::default()
    });

    let result = handlers::programs::get_admin_programs(admin_user(), State(state)).await;

    let Json(programs) = result.unwrap();
    assert_eq!(programs.len(), 1);
}

// --- Booking ---

#[test]
async fn test_book_appointment_success() {
    let (state, _repo) = create_test_state(MockRepo::default());

    let payload = BookAppointmentRequest {
        psychologist_id: Uuid::new_v4(),
        date: Utc::now(),
        duration_minutes: None,
        notes: None,
    };

    let result =
        handlers::appointments::book_appointment(regular_user(), State(state), Json(payload)).await;

    let (status, _body) = result.unwrap();
    assert_eq!(status, StatusCode::CREATED);
}

#[test]
async fn test_book_appointment_conflict_when_slot_taken() {
    // booking_result: None simulates the unique-index rejection.
    let (state, _repo) = create_test_state(MockRepo {
        booking_result: None,
        ..MockRepo::default()
    });

    let payload = BookAppointmentRequest {
        psychologist_id: Uuid::new_v4(),
        date: Utc::now(),
        duration_minutes: Some(60),
        notes: None,
    };

    let result =
        handlers::appointments::book_appointment(regular_user(), State(state), Json(payload)).await;

    assert_error(result.unwrap_err(), "CONFLICT");
}

#[test]
async fn test_book_appointment_unknown_psychologist() {
    let (state, repo) = create_test_state(MockRepo {
        psychologist_to_return: None,
        ..MockRepo::default()
    });

    let payload = BookAppointmentRequest {
        psychologist_id: Uuid::new_v4(),
        date: Utc::now(),
        duration_minutes: None,
        notes: None,
    };

    let result =
        handlers::appointments::book_appointment(regular_user(), State(state), Json(payload)).await;

    assert_error(result.unwrap_err(), "NOT_FOUND");
    assert_eq!(repo.mutation_count(), 0);
}

// --- Cancellation ---

#[test]
async fn test_cancel_appointment_success() {
    let appointment = Appointment {
        user_id: TEST_ID,
        status: AppointmentStatus::Pending,
        ..Appointment::default()
    };
    let (state, _repo) = create_test_state(MockRepo {
        appointment_to_return: Some(appointment),
        ..MockRepo::default()
    });

    let result =
        handlers::appointments::cancel_appointment(regular_user(), State(state), Path(TEST_ID))
            .await;

    let Json(cancelled) = result.unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
}

#[test]
async fn test_cancel_appointment_not_owner_is_not_found() {
    // Someone else's appointment is indistinguishable from a missing one.
    let appointment = Appointment {
        user_id: Uuid::new_v4(),
        ..Appointment::default()
    };
    let (state, repo) = create_test_state(MockRepo {
        appointment_to_return: Some(appointment),
        ..MockRepo::default()
    });

    let result =
        handlers::appointments::cancel_appointment(regular_user(), State(state), Path(TEST_ID))
            .await;

    assert_error(result.unwrap_err(), "NOT_FOUND");
    assert_eq!(repo.mutation_count(), 0);
}

#[test]
async fn test_cancel_appointment_twice_is_bad_request() {
    let appointment = Appointment {
        user_id: TEST_ID,
        status: AppointmentStatus::Cancelled,
        ..Appointment::default()
    };
    let (state, repo) = create_test_state(MockRepo {
        appointment_to_return: Some(appointment),
        ..MockRepo::default()
    });

    let result =
        handlers::appointments::cancel_appointment(regular_user(), State(state), Path(TEST_ID))
            .await;

    assert_error(result.unwrap_err(), "BAD_REQUEST");
    assert_eq!(repo.mutation_count(), 0);
}

// --- Pagination envelope ---

#[test]
async fn test_my_appointments_pops_overflow_row_into_cursor() {
    // Repo hands back limit + 1 rows; the handler must return limit items
    // and surface the overflow row's id as next_cursor.
    let rows: Vec<Appointment> = (0..3)
        .map(|i| Appointment {
            id: Uuid::from_u128(i as u128 + 1),
            user_id: TEST_ID,
            ..Appointment::default()
        })
        .collect();
    let overflow_id = rows[2].id;

    let (state, _repo) = create_test_state(MockRepo {
        appointments_to_return: rows,
        ..MockRepo::default()
    });

    let filter = AppointmentFilter {
        limit: Some(2),
        cursor: None,
        status: None,
    };

    let result =
        handlers::appointments::get_my_appointments(regular_user(), State(state), Query(filter))
            .await;

    let Json(page) = result.unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.next_cursor, Some(overflow_id));
}

#[test]
async fn test_my_appointments_no_cursor_when_page_not_full() {
    let rows = vec![Appointment {
        user_id: TEST_ID,
        ..Appointment::default()
    }];
    let (state, _repo) = create_test_state(MockRepo {
        appointments_to_return: rows,
        ..MockRepo::default()
    });

    let filter = AppointmentFilter {
        limit: Some(10),
        cursor: None,
        status: None,
    };

    let result =
        handlers::appointments::get_my_appointments(regular_user(), State(state), Query(filter))
            .await;

    let Json(page) = result.unwrap();
    assert_eq!(page.items.len(), 1);
    assert!(page.next_cursor.is_none());
}

#[test]
async fn test_public_programs_pagination_shape() {
    let rows: Vec<Program> = (0..11)
        .map(|i| Program {
            id: Uuid::from_u128(i as u128 + 1),
            ..Program::default()
        })
        .collect();
    let (state, _repo) = create_test_state(MockRepo {
        programs_to_return: rows,
        ..MockRepo::default()
    });

    let filter = ProgramFilter {
        limit: Some(10),
        cursor: None,
        upcoming_only: None,
        search: None,
    };

    let result = handlers::programs::get_programs(State(state), Query(filter)).await;
    let Json(page): Json<Page<Program>> = result.unwrap();

    assert_eq!(page.items.len(), 10);
    assert_eq!(page.next_cursor, Some(Uuid::from_u128(11)));
}

// --- Program registration outcomes ---

#[test]
async fn test_register_for_program_duplicate_conflict() {
    let (state, _repo) = create_test_state(MockRepo {
        registration_outcome: RegistrationOutcome::AlreadyRegistered,
        ..MockRepo::default()
    });

    let payload = calme_portal::models::RegisterProgramRequest {
        name: "Sam".to_string(),
        email: "sam@example.com".to_string(),
        phone: None,
    };

    let result =
        handlers::programs::register_for_program(State(state), Path(TEST_ID), Json(payload)).await;

    assert_error(result.unwrap_err(), "CONFLICT");
}

#[test]
async fn test_register_for_program_full_capacity() {
    let (state, _repo) = create_test_state(MockRepo {
        registration_outcome: RegistrationOutcome::AtCapacity,
        ..MockRepo::default()
    });

    let payload = calme_portal::models::RegisterProgramRequest {
        name: "Sam".to_string(),
        email: "sam@example.com".to_string(),
        phone: None,
    };

    let result =
        handlers::programs::register_for_program(State(state), Path(TEST_ID), Json(payload)).await;

    assert_error(result.unwrap_err(), "BAD_REQUEST");
}

// --- Input validation ---

#[test]
async fn test_submit_testimonial_rejects_out_of_range_rating() {
    let (state, repo) = create_test_state(MockRepo::default());

    let payload = SubmitTestimonialRequest {
        name: "A".to_string(),
        role: "Client".to_string(),
        content: "Truly life-changing support".to_string(),
        image_url: None,
        rating: Some(9),
    };

    let result = handlers::testimonials::submit_testimonial(State(state), Json(payload)).await;

    assert_error(result.unwrap_err(), "BAD_REQUEST");
    assert_eq!(repo.mutation_count(), 0);
}

#[test]
async fn test_submit_contact_rejects_short_message() {
    let (state, repo) = create_test_state(MockRepo::default());

    let payload = SubmitContactRequest {
        name: "A".to_string(),
        email: "a@example.com".to_string(),
        phone: None,
        subject: "Hi".to_string(),
        message: "short".to_string(),
    };

    let result = handlers::contact::submit_contact(State(state), Json(payload)).await;

    assert_error(result.unwrap_err(), "BAD_REQUEST");
    assert_eq!(repo.mutation_count(), 0);
}

// --- Portal gate ---

#[test]
async fn test_portal_stats_forbidden_for_regular_user() {
    let (state, _repo) = create_test_state(MockRepo::default());

    let result = handlers::portal::get_portal_stats(regular_user(), State(state)).await;

    assert_error(result.unwrap_err(), "FORBIDDEN");
}

#[test]
async fn test_portal_stats_not_found_without_linked_profile() {
    // Right role, but no clinician profile linked to the login.
    let (state, _repo) = create_test_state(MockRepo {
        psychologist_to_return: None,
        ..MockRepo::default()
    });

    let result = handlers::portal::get_portal_stats(psychologist_user(), State(state)).await;

    assert_error(result.unwrap_err(), "NOT_FOUND");
}

// --- Misc ---

#[test]
async fn test_download_resource_not_found_for_draft() {
    let (state, _repo) = create_test_state(MockRepo {
        resource_to_return: None,
        ..MockRepo::default()
    });

    let result = handlers::resources::download_resource(State(state), Path(TEST_ID)).await;

    assert_error(result.unwrap_err(), "NOT_FOUND");
}

#[test]
async fn test_get_program_details_serializes_flat() {
    // ProgramDetail flattens the program row and appends registrations.
    let (state, _repo) = create_test_state(MockRepo::default());

    let result = handlers::programs::get_program_details(State(state), Path(TEST_ID)).await;
    let response = result.unwrap().into_response();
    let (parts, body) = response.into_parts();
    assert_eq!(parts.status, StatusCode::OK);

    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(value.get("title").is_some(), "program fields are flattened");
    assert!(value.get("registrations").is_some());
}
