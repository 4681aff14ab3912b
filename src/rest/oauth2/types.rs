//! Types for the OAuth2 endpoints.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Grant type for the client-credentials exchange.
pub const CLIENT_CREDENTIALS: &str = "client_credentials";

/// Body of a token issuance request.
#[derive(Clone, Serialize)]
pub struct TokenRequest<'a> {
    /// Always [`CLIENT_CREDENTIALS`].
    pub grant_type: &'a str,
    /// Application key.
    pub appkey: &'a str,
    /// Application secret.
    pub appsecret: &'a str,
}

impl std::fmt::Debug for TokenRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRequest")
            .field("grant_type", &self.grant_type)
            .field("appkey", &self.appkey)
            .field("appsecret", &"[REDACTED]")
            .finish()
    }
}

/// Token issuance response.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct TokenResponse {
    /// The bearer access token.
    pub access_token: String,
    /// Token type, normally `"Bearer"`.
    pub token_type: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
    /// Expiry timestamp as reported by KIS (`YYYY-MM-DD HH:MM:SS`, KST).
    pub access_token_token_expired: String,
}

impl TokenResponse {
    /// The token lifetime. Negative values clamp to zero.
    pub fn expires_after(&self) -> Duration {
        Duration::from_secs(self.expires_in.max(0) as u64)
    }
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("access_token_token_expired", &self.access_token_token_expired)
            .finish()
    }
}
