//! Webhook handler for identity-provider lifecycle events
//!
//! Deliveries are at-least-once and may arrive out of order; the event
//! application in mkt-core is idempotent, so redelivery is safe. When a
//! shared secret is configured the bearer token is checked before any
//! processing happens.

use crate::{ApiError, ApiResult, AppState, WebhookResponse};

use mkt_core::{EventOutcome, LifecycleEvent};

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
};
use serde_json::{Value, json};

/// POST /api/webhooks/identity
pub async fn receive_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(event): Json<LifecycleEvent>,
) -> ApiResult<Json<WebhookResponse>> {
    if let Some(ref secret) = state.webhook_secret {
        let expected = format!("Bearer {}", secret);
        let provided = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        if provided != Some(expected.as_str()) {
            return Err(ApiError::unauthenticated("Invalid webhook credentials"));
        }
    }

    let outcome = state.sync.apply_event(&event).await?;

    Ok(Json(WebhookResponse {
        success: true,
        message: outcome_message(outcome),
    }))
}

/// GET /api/webhooks/identity
///
/// Static liveness payload for provider-side endpoint verification
pub async fn verify_endpoint() -> Json<Value> {
    Json(json!({
        "message": "Identity webhook endpoint",
        "status": "active",
    }))
}

fn outcome_message(outcome: EventOutcome) -> String {
    match outcome {
        EventOutcome::Synced => "User synced",
        EventOutcome::Updated => "User updated",
        EventOutcome::Deleted(_) => "User deleted",
        EventOutcome::Ignored => "Event processed",
    }
    .to_string()
}
