/*!
 * # Session authentication
 *
 * A single configured credential pair is exchanged for a single static
 * bearer token. Protected routes run behind [`auth_middleware`], which only
 * checks that the presented token equals the configured one. There is no
 * expiry and no per-user scoping.
 */

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::errors::ServiceError;

mod types;

pub use types::*;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const MISSING_TOKEN: &str = "Missing token";
pub const INVALID_TOKEN: &str = "Invalid token";

/// Holds the one valid credential and the token it unlocks.
#[derive(Clone)]
pub struct SessionStore {
    username: String,
    password: String,
    token: String,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            token: token.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.auth_username.clone(),
            config.auth_password.clone(),
            config.auth_token.clone(),
        )
    }

    /// Exchanges the configured credential pair for the bearer token.
    pub fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ServiceError> {
        if username == self.username && password == self.password {
            debug!(username, "login accepted");
            Ok(LoginResponse {
                token: self.token.clone(),
                user: SessionUser {
                    username: username.to_string(),
                },
            })
        } else {
            warn!(username, "login rejected");
            Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()))
        }
    }

    /// Fails unless `token` is present and equal to the configured token.
    pub fn authorize(&self, token: Option<&str>) -> Result<(), ServiceError> {
        match token {
            None => Err(ServiceError::Unauthorized(MISSING_TOKEN.to_string())),
            Some(t) if t == self.token => Ok(()),
            Some(_) => Err(ServiceError::Unauthorized(INVALID_TOKEN.to_string())),
        }
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Rejects the request with 401 unless it carries the session token.
pub async fn auth_middleware(
    State(sessions): State<Arc<SessionStore>>,
    request: Request,
    next: Next,
) -> Response {
    match sessions.authorize(extract_bearer(request.headers())) {
        Ok(()) => next.run(request).await,
        Err(err) => {
            warn!(path = %request.uri().path(), reason = %err, "unauthorized request");
            err.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn store() -> SessionStore {
        SessionStore::new("candidate", "test123", "mock-token-123")
    }

    #[test]
    fn login_with_configured_pair() {
        let response = store().login("candidate", "test123").unwrap();
        assert_eq!(response.token, "mock-token-123");
        assert_eq!(response.user.username, "candidate");
    }

    #[test]
    fn login_rejects_any_mismatch() {
        for (user, pass) in [("candidate", "nope"), ("admin", "test123"), ("", "")] {
            assert_eq!(
                store().login(user, pass),
                Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.into()))
            );
        }
    }

    #[test]
    fn authorize_distinguishes_missing_and_invalid() {
        let s = store();
        assert!(s.authorize(Some("mock-token-123")).is_ok());
        assert_eq!(
            s.authorize(None),
            Err(ServiceError::Unauthorized(MISSING_TOKEN.into()))
        );
        assert_eq!(
            s.authorize(Some("mock-token-124")),
            Err(ServiceError::Unauthorized(INVALID_TOKEN.into()))
        );
    }

    #[test]
    fn bearer_prefix_required() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Token abc"));
        assert_eq!(extract_bearer(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(extract_bearer(&headers), Some("abc"));
    }
}
