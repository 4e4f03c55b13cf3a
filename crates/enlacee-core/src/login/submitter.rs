use tracing::{debug, info};

use crate::api::ApiClient;
use crate::auth::{Cookie, CookieOptions, CookieStore, Credentials, SessionToken, SESSION_COOKIE_NAME};

use super::LoginError;

/// A completed login: the stored token plus the backend's response payload
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: SessionToken,
    pub payload: serde_json::Value,
}

/// Submits credentials and persists the issued session token.
pub struct SessionSubmitter<S: CookieStore> {
    api: ApiClient,
    cookies: S,
}

impl<S: CookieStore> SessionSubmitter<S> {
    pub fn new(api: ApiClient, cookies: S) -> Self {
        Self { api, cookies }
    }

    /// The stored session cookie, if it has not expired
    pub fn session_cookie(&self) -> Option<Cookie> {
        self.cookies.get(SESSION_COOKIE_NAME)
    }

    /// Validate, send one login request, and on success store the token as
    /// a site-wide secure cookie expiring one hour after issuance.
    pub async fn submit(&mut self, credentials: &Credentials) -> Result<LoginOutcome, LoginError> {
        if let Some(field) = credentials.missing_field() {
            debug!(field = field.label(), "Login not sent, field empty");
            return Err(LoginError::Validation { field });
        }

        let response = self.api.login(credentials).await?;
        let token = SessionToken::issue(response.token);

        self.cookies
            .set(
                SESSION_COOKIE_NAME,
                &token.token,
                CookieOptions::site_wide(token.expires_at),
            )
            .map_err(LoginError::Storage)?;

        info!(email = %credentials.email, expires_at = %token.expires_at, "Login successful");

        Ok(LoginOutcome {
            token,
            payload: response.payload,
        })
    }
}
