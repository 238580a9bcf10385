//! Session-sync handler
//!
//! Called by the client after login/signup to make sure the local record
//! for the authenticated identity exists. The only entry point allowed to
//! pick the role at creation time.

use crate::{ApiResult, AppState, CurrentIdentity, SyncUserRequest, SyncUserResponse};

use mkt_core::SyncOverrides;

use axum::{Json, body::Bytes, extract::State};

/// POST /api/auth/sync-user
///
/// Requires a verified session; optional JSON body `{ "role": ... }`
pub async fn sync_user(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    body: Bytes,
) -> ApiResult<Json<SyncUserResponse>> {
    // An absent or malformed body simply carries no overrides
    let request: SyncUserRequest = serde_json::from_slice(&body).unwrap_or_default();

    let user = state
        .sync
        .get_or_create(&identity, &SyncOverrides::with_role(request.role))
        .await?;

    Ok(Json(SyncUserResponse {
        success: true,
        user: user.into(),
    }))
}
