use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ERROR_REDIRECT, DEFAULT_POST_LOGIN_REDIRECT,
    MIN_JWT_SECRET_LEN,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 secret the provider signs access tokens with
    pub jwt_secret: Option<String>,
    /// Base URL of the provider's auth API (code exchange)
    pub provider_url: Option<String>,
    /// Where the callback sends the browser when code exchange fails
    pub error_redirect: String,
    /// Post-login redirect when the callback carries no `next`
    pub post_login_redirect: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            provider_url: None,
            error_redirect: String::from(DEFAULT_ERROR_REDIRECT),
            post_login_redirect: String::from(DEFAULT_POST_LOGIN_REDIRECT),
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match self.jwt_secret {
            Some(ref secret) if secret.len() >= MIN_JWT_SECRET_LEN => {}
            Some(_) => {
                return Err(ConfigError::auth(format!(
                    "auth.jwt_secret must be at least {} bytes",
                    MIN_JWT_SECRET_LEN
                )));
            }
            None => {
                return Err(ConfigError::auth(
                    "auth.jwt_secret is required (MKT_AUTH_JWT_SECRET)",
                ));
            }
        }

        match self.provider_url {
            Some(ref url) if url.starts_with("http://") || url.starts_with("https://") => {}
            Some(_) => {
                return Err(ConfigError::auth(
                    "auth.provider_url must start with http:// or https://",
                ));
            }
            None => {
                return Err(ConfigError::auth(
                    "auth.provider_url is required (MKT_AUTH_PROVIDER_URL)",
                ));
            }
        }

        if !self.error_redirect.starts_with('/') {
            return Err(ConfigError::auth("auth.error_redirect must be a local path"));
        }
        if !self.post_login_redirect.starts_with('/') {
            return Err(ConfigError::auth(
                "auth.post_login_redirect must be a local path",
            ));
        }

        Ok(())
    }
}
