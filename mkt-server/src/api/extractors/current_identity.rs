//! Axum extractor for the verified session identity

use crate::{ApiError, AppState};

use mkt_auth::{AuthError, bearer_token};
use mkt_core::ExternalIdentity;

use std::future::Future;

use axum::{extract::FromRequestParts, http::header, http::request::Parts};

/// Extracts the external identity from a verified `Authorization: Bearer`
/// access token. Rejects with 401 when the header is missing or the token
/// does not verify.
pub struct CurrentIdentity(pub ExternalIdentity);

impl FromRequestParts<AppState> for CurrentIdentity {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let header = parts
                .headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .ok_or_else(AuthError::missing_header)?;

            let token = bearer_token(header)?;
            let identity = state.verifier.verify(token)?;

            Ok(CurrentIdentity(identity))
        }
    }
}
