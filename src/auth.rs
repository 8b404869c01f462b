use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;

use crate::errors::WikiError;
use crate::types::AppState;

/// Extractor enforcing HTTP basic authentication on a handler.
///
/// Every endpoint requires the single shared credential from the config;
/// a missing, malformed, or mismatched header rejects with 401 before the
/// handler body runs.
pub struct RequireAuth;

#[async_trait]
impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = WikiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, WikiError> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(WikiError::Unauthorized)?;

        let encoded = header_value
            .strip_prefix("Basic ")
            .ok_or(WikiError::Unauthorized)?;
        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|_| WikiError::Unauthorized)?;
        let decoded = String::from_utf8(decoded).map_err(|_| WikiError::Unauthorized)?;
        let (user, password) = decoded.split_once(':').ok_or(WikiError::Unauthorized)?;

        let config = &state.config;
        if user == config.auth_user && password == config.auth_password {
            Ok(Self)
        } else {
            debug!("Rejected basic-auth attempt for user '{}'", user);
            Err(WikiError::Unauthorized)
        }
    }
}

/// Encode a user/password pair as a basic-auth header value
pub fn encode_credentials(user: &str, password: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", user, password))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_the_shared_credential() {
        // "user:password" in RFC 4648 base64
        assert_eq!(encode_credentials("user", "password"), "Basic dXNlcjpwYXNzd29yZA==");
    }
}
