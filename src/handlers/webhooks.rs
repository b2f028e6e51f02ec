use crate::{AppState, error::ApiError};
use axum::{Json, extract::State, http::StatusCode};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use serde_json::json;

/// IdentityEvent
///
/// Payload of an identity-provider webhook token. Only the user sync events
/// are handled; anything else is acknowledged and ignored.
#[derive(Debug, Deserialize)]
pub struct IdentityEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub data: IdentityEventData,
}

#[derive(Debug, Default, Deserialize)]
pub struct IdentityEventData {
    pub user: Option<IdentityUser>,
}

/// The provider sends name/avatar fields under two historical spellings;
/// both are accepted.
#[derive(Debug, Deserialize)]
pub struct IdentityUser {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub picture: Option<String>,
    pub avatar: Option<String>,
}

/// identity_webhook
///
/// [Webhook Route] Keeps the local `users` table in sync with the identity
/// provider: `user.created` / `user.updated` upsert by external id,
/// `user.deleted` removes the row.
///
/// Contract with the provider: an undecodable token is the caller's fault
/// (400); once the event is decoded, per-event handling errors are logged and
/// swallowed and the endpoint still acknowledges with 200, so the provider
/// does not retry a permanently-failing event forever.
#[utoipa::path(
    post,
    path = "/webhooks/identity",
    responses(
        (status = 200, description = "Acknowledged"),
        (status = 400, description = "Undecodable token")
    )
)]
pub async fn identity_webhook(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<serde_json::Value>, ApiError> {
    // The webhook body is one signed JWT. Validated with the dedicated
    // webhook secret; these tokens carry no exp claim.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let key = DecodingKey::from_secret(state.config.webhook_secret.as_bytes());
    let event = decode::<IdentityEvent>(body.trim(), &key, &validation)
        .map_err(|e| {
            tracing::warn!("identity webhook token rejected: {:?}", e);
            ApiError::BadRequest("Invalid webhook token".to_string())
        })?
        .claims;

    tracing::info!("identity webhook event: {}", event.event_type);

    if let Err(e) = handle_event(&state, &event).await {
        // Logged, not rethrown: a 5xx here would make the provider retry an
        // event we will never be able to process.
        tracing::error!("error handling webhook event {}: {:?}", event.event_type, e);
    }

    Ok(Json(json!({ "status": StatusCode::OK.as_u16(), "statusText": "success" })))
}

async fn handle_event(state: &AppState, event: &IdentityEvent) -> Result<(), sqlx::Error> {
    let Some(user) = event.data.user.as_ref() else {
        tracing::warn!("webhook event {} carried no user data", event.event_type);
        return Ok(());
    };

    match event.event_type.as_str() {
        "user.created" | "user.updated" => {
            let email = user.email.clone().unwrap_or_default();
            let first_name = user
                .first_name
                .clone()
                .or_else(|| user.given_name.clone())
                .unwrap_or_default();
            let last_name = user
                .last_name
                .clone()
                .or_else(|| user.family_name.clone())
                .unwrap_or_default();
            let image_url = user
                .picture
                .clone()
                .or_else(|| user.avatar.clone())
                .unwrap_or_default();

            let synced = state
                .repo
                .upsert_user(&user.id, &email, &first_name, &last_name, &image_url)
                .await?;
            tracing::info!("user {} synced from identity provider", synced.id);
        }
        "user.deleted" => {
            let removed = state.repo.delete_user_by_kinde_id(&user.id).await?;
            if removed {
                tracing::info!("user {} removed after provider deletion", user.id);
            }
        }
        other => {
            tracing::debug!("unhandled identity webhook event type: {}", other);
        }
    }

    Ok(())
}
