//! API client for the Enlacee backend.
//!
//! Exactly one request is issued per login attempt. There is no retry or
//! backoff: a submission either succeeds or fails once.

use std::time::Duration;

use anyhow::Result;
use reqwest::{header, Client};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::auth::Credentials;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Path of the authentication endpoint, relative to the backend base URL
const LOGIN_PATH: &str = "login";

/// HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct AuthResponse {
    user: AuthUser,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    token: String,
}

/// A successful login: the issued token plus the full response payload
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub token: String,
    pub payload: serde_json::Value,
}

/// API client for the Enlacee backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client rooted at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL of the login endpoint
    pub fn login_url(&self) -> String {
        format!("{}/{}", self.base_url, LOGIN_PATH)
    }

    /// Submit credentials and return the issued session token
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let url = self.login_url();
        debug!(url = %url, email = %credentials.email, "Sending login request");

        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(credentials)
            .send()
            .await?;

        let response = Self::check_response(response).await?;

        let body = response.text().await?;
        Self::parse_login_body(&body)
    }

    /// Check if response is successful, returning the backend's error if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(
                status = status.as_u16(),
                body = %ApiError::truncate_body(&body),
                "Login request rejected"
            );
            Err(ApiError::from_status(status, &body))
        }
    }

    fn parse_login_body(body: &str) -> Result<LoginResponse, ApiError> {
        let payload: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse login response: {}", e)))?;

        let auth = AuthResponse::deserialize(&payload)
            .map_err(|e| ApiError::InvalidResponse(format!("Login response has no user token: {}", e)))?;

        Ok(LoginResponse {
            token: auth.user.token,
            payload,
        })
    }
}
