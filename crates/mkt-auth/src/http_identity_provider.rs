use crate::{AuthError, IdentityProvider, Result as AuthErrorResult};

use mkt_core::ExternalIdentity;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Talks to the provider's token endpoint over HTTP
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    token_url: String,
}

impl HttpIdentityProvider {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            token_url: format!("{}/token", base_url.trim_end_matches('/')),
        }
    }
}

#[derive(Serialize)]
struct ExchangeRequest<'a> {
    auth_code: &'a str,
}

#[derive(Deserialize)]
struct ExchangeResponse {
    user: ProviderUser,
}

#[derive(Deserialize)]
struct ProviderUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Map<String, Value>,
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn exchange_code(&self, code: &str) -> AuthErrorResult<ExternalIdentity> {
        let response = self
            .client
            .post(&self.token_url)
            .query(&[("grant_type", "authorization_code")])
            .json(&ExchangeRequest { auth_code: code })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::exchange(format!(
                "provider returned status {}",
                response.status()
            )));
        }

        let body: ExchangeResponse = response.json().await?;

        Ok(ExternalIdentity {
            id: body.user.id,
            email: body.user.email,
            metadata: body.user.user_metadata,
        })
    }
}
