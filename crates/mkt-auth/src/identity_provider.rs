use crate::Result as AuthErrorResult;

use mkt_core::ExternalIdentity;

use async_trait::async_trait;

/// The external auth service, seen only through the operations this system
/// needs. Keeping it a trait lets request handlers run against a canned
/// provider in tests.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange a one-time authorization code for the user identity it was
    /// issued to. Codes are single-use; a second exchange fails.
    async fn exchange_code(&self, code: &str) -> AuthErrorResult<ExternalIdentity>;
}
