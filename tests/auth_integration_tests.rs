mod common;

use axum::{extract::FromRequestParts, http::Request};
use calme_portal::{
    AppConfig, AppState,
    auth::{AuthUser, Claims},
    config::Env,
};
use common::{MockRepo, TEST_ID, create_test_state, user_with_role};
use jsonwebtoken::{EncodingKey, Header, encode};
use std::time::{SystemTime, UNIX_EPOCH};

fn now_secs() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_secs() as usize
}

fn make_token(secret: &str, sub: &str, exp: usize) -> String {
    let claims = Claims {
        sub: sub.to_string(),
        exp,
        iat: now_secs(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("token encoding")
}

async fn extract(state: &AppState, request: Request<()>) -> Result<AuthUser, calme_portal::ApiError> {
    let (mut parts, _) = request.into_parts();
    AuthUser::from_request_parts(&mut parts, state).await
}

#[tokio::test]
async fn test_missing_authorization_header_is_rejected() {
    let (state, _repo) = create_test_state(MockRepo {
        user_to_return: Some(user_with_role("USER")),
        ..MockRepo::default()
    });
    // Force Production so the local bypass cannot kick in.
    let state = AppState {
        config: AppConfig {
            env: Env::Production,
            ..AppConfig::default()
        },
        ..state
    };

    let request = Request::builder().uri("/me").body(()).unwrap();
    let result = extract(&state, request).await;

    assert_eq!(result.unwrap_err().code(), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_valid_token_resolves_user_and_role() {
    let (state, _repo) = create_test_state(MockRepo {
        user_to_return: Some(user_with_role("ADMIN")),
        ..MockRepo::default()
    });

    let token = make_token(
        &state.config.jwt_secret,
        "kinde|test-user",
        now_secs() + 3600,
    );
    let request = Request::builder()
        .uri("/me")
        .header("authorization", format!("Bearer {}", token))
        .body(())
        .unwrap();

    let auth_user = extract(&state, request).await.unwrap();
    assert_eq!(auth_user.id, TEST_ID);
    assert_eq!(auth_user.role, "ADMIN");
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let (state, _repo) = create_test_state(MockRepo {
        user_to_return: Some(user_with_role("USER")),
        ..MockRepo::default()
    });

    let token = make_token(
        &state.config.jwt_secret,
        "kinde|test-user",
        now_secs() - 3600,
    );
    let request = Request::builder()
        .uri("/me")
        .header("authorization", format!("Bearer {}", token))
        .body(())
        .unwrap();

    let result = extract(&state, request).await;
    assert_eq!(result.unwrap_err().code(), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_token_signed_with_wrong_secret_is_rejected() {
    let (state, _repo) = create_test_state(MockRepo {
        user_to_return: Some(user_with_role("USER")),
        ..MockRepo::default()
    });

    let token = make_token("some-other-secret", "kinde|test-user", now_secs() + 3600);
    let request = Request::builder()
        .uri("/me")
        .header("authorization", format!("Bearer {}", token))
        .body(())
        .unwrap();

    let result = extract(&state, request).await;
    assert_eq!(result.unwrap_err().code(), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_valid_token_for_deleted_user_is_rejected() {
    // Token checks out, but the webhook already removed the row: the session
    // is dead even though the JWT is still within its lifetime.
    let (state, _repo) = create_test_state(MockRepo {
        user_to_return: None,
        ..MockRepo::default()
    });

    let token = make_token(
        &state.config.jwt_secret,
        "kinde|test-user",
        now_secs() + 3600,
    );
    let request = Request::builder()
        .uri("/me")
        .header("authorization", format!("Bearer {}", token))
        .body(())
        .unwrap();

    let result = extract(&state, request).await;
    assert_eq!(result.unwrap_err().code(), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_bearer_prefix_is_required() {
    let (state, _repo) = create_test_state(MockRepo {
        user_to_return: Some(user_with_role("USER")),
        ..MockRepo::default()
    });
    let state = AppState {
        config: AppConfig {
            env: Env::Production,
            ..AppConfig::default()
        },
        ..state
    };

    let token = make_token(
        &state.config.jwt_secret,
        "kinde|test-user",
        now_secs() + 3600,
    );
    let request = Request::builder()
        .uri("/me")
        .header("authorization", token)
        .body(())
        .unwrap();

    let result = extract(&state, request).await;
    assert_eq!(result.unwrap_err().code(), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_local_bypass_resolves_known_user() {
    let (state, _repo) = create_test_state(MockRepo {
        user_to_return: Some(user_with_role("PSYCHOLOGIST")),
        ..MockRepo::default()
    });
    assert_eq!(state.config.env, Env::Local);

    let request = Request::builder()
        .uri("/me")
        .header("x-user-id", TEST_ID.to_string())
        .body(())
        .unwrap();

    let auth_user = extract(&state, request).await.unwrap();
    assert_eq!(auth_user.role, "PSYCHOLOGIST");
}

#[tokio::test]
async fn test_local_bypass_disabled_in_production() {
    let (state, _repo) = create_test_state(MockRepo {
        user_to_return: Some(user_with_role("ADMIN")),
        ..MockRepo::default()
    });
    let state = AppState {
        config: AppConfig {
            env: Env::Production,
            ..AppConfig::default()
        },
        ..state
    };

    let request = Request::builder()
        .uri("/me")
        .header("x-user-id", TEST_ID.to_string())
        .body(())
        .unwrap();

    // Header alone must not authenticate outside Env::Local.
    let result = extract(&state, request).await;
    assert_eq!(result.unwrap_err().code(), "UNAUTHORIZED");
}
