use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::Cookie;

/// Name of the cookie holding the session token
pub const SESSION_COOKIE_NAME: &str = "ENLACEE_TOKEN";

/// Token lifetime in minutes, counted from issuance.
const TOKEN_LIFETIME_MINUTES: i64 = 60;

/// Opaque backend-issued token with its issuance and expiry times
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionToken {
    /// A token issued now
    pub fn issue(token: impl Into<String>) -> Self {
        Self::issued_at(token, Utc::now())
    }

    pub fn issued_at(token: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            issued_at,
            expires_at: issued_at + Self::lifetime(),
        }
    }

    /// Rebuild a token from its stored cookie; issuance is inferred from
    /// the cookie's expiry.
    pub fn from_cookie(cookie: &Cookie) -> Self {
        Self {
            token: cookie.value.clone(),
            issued_at: cookie.options.expires - Self::lifetime(),
            expires_at: cookie.options.expires,
        }
    }

    pub fn lifetime() -> Duration {
        Duration::minutes(TOKEN_LIFETIME_MINUTES)
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    pub fn time_until_expiry(&self) -> Duration {
        self.expires_at - Utc::now()
    }

    /// Get minutes remaining until expiry (for display)
    pub fn minutes_until_expiry(&self) -> i64 {
        self.time_until_expiry().num_minutes().max(0)
    }
}
