//! Auth callback handler
//!
//! Completes the provider's redirect flow: exchanges the one-time code for
//! an identity, best-effort syncs the local record, and sends the browser
//! on. Only a failed code exchange aborts the flow; a failed sync is
//! logged and the login still completes, because a later session-sync call
//! repairs the record.

use crate::AppState;

use mkt_core::SyncOverrides;

use axum::{
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub next: Option<String>,
}

/// GET /auth/callback?code=&next=
pub async fn auth_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Redirect {
    if let Some(ref code) = query.code {
        let identity = match state.provider.exchange_code(code).await {
            Ok(identity) => identity,
            Err(e) => {
                log::error!("Auth callback code exchange failed: {}", e);
                return Redirect::to(&state.error_redirect);
            }
        };

        // Examined only to decide whether to log; must never block the
        // redirect that completes the login
        if let Err(e) = state
            .sync
            .get_or_create(&identity, &SyncOverrides::default())
            .await
        {
            log::error!("User sync after callback failed for {}: {}", identity.id, e);
        }
    }

    Redirect::to(&sanitize_next(
        query.next.as_deref(),
        &state.post_login_redirect,
    ))
}

/// Only local paths are honored; anything else falls back to the default
pub(crate) fn sanitize_next(next: Option<&str>, default: &str) -> String {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => default.to_string(),
    }
}
