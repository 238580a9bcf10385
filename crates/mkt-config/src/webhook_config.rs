use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct WebhookConfig {
    /// Shared secret checked against the webhook's bearer token.
    /// None disables the check entirely (open webhook).
    pub secret: Option<String>,
}

impl WebhookConfig {
    /// True when no secret is configured and the endpoint accepts
    /// unauthenticated deliveries
    pub fn is_open(&self) -> bool {
        self.secret.is_none()
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if let Some(ref secret) = self.secret
            && secret.is_empty()
        {
            return Err(ConfigError::webhook(
                "webhook.secret must be non-empty when set (unset it to disable the check)",
            ));
        }

        Ok(())
    }
}
