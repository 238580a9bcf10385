use crate::{AuthError, Result as AuthErrorResult};

/// Extract the token from an `Authorization: Bearer <token>` header value
#[track_caller]
pub fn bearer_token(header: &str) -> AuthErrorResult<&str> {
    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(AuthError::invalid_scheme)?;

    if token.is_empty() {
        return Err(AuthError::invalid_scheme());
    }

    Ok(token)
}
