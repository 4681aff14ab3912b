//! Credential management for KIS API authentication.

use secrecy::{ExposeSecret, SecretString};

use crate::error::KisError;

/// Environment variable holding the application key.
pub const APP_KEY_VAR: &str = "KIS_APP_KEY";
/// Environment variable holding the application secret.
pub const APP_SECRET_VAR: &str = "KIS_APP_SECRET";
/// Environment variable holding the account number.
pub const ACCOUNT_NO_VAR: &str = "KIS_ACCOUNT_NO";
/// Environment variable holding a previously issued access token.
pub const ACCESS_TOKEN_VAR: &str = "KIS_ACCESS_TOKEN";

/// Application credentials issued by the KIS developer portal.
#[derive(Clone)]
pub struct Credentials {
    /// The application key (public identifier)
    pub app_key: String,
    /// The application secret
    app_secret: SecretString,
    /// Account number, e.g. `"12345678-01"`
    pub account_no: String,
}

impl Credentials {
    /// Create new credentials from an app key and secret.
    pub fn new(app_key: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            app_secret: SecretString::from(app_secret.into()),
            account_no: String::new(),
        }
    }

    /// Attach an account number.
    pub fn with_account_no(mut self, account_no: impl Into<String>) -> Self {
        self.account_no = account_no.into();
        self
    }

    /// Get the application secret.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.app_secret.expose_secret()
    }

    /// Load credentials from `KIS_APP_KEY`, `KIS_APP_SECRET` and `KIS_ACCOUNT_NO`.
    ///
    /// The account number is optional; the key and secret are not.
    pub fn from_env() -> Result<Self, KisError> {
        Self::from_env_vars(APP_KEY_VAR, APP_SECRET_VAR, ACCOUNT_NO_VAR)
    }

    /// Load credentials from custom environment variable names.
    pub fn from_env_vars(
        key_var: &str,
        secret_var: &str,
        account_var: &str,
    ) -> Result<Self, KisError> {
        let app_key = std::env::var(key_var).map_err(|_| KisError::MissingEnv(key_var.into()))?;
        let app_secret =
            std::env::var(secret_var).map_err(|_| KisError::MissingEnv(secret_var.into()))?;
        let account_no = std::env::var(account_var).unwrap_or_default();

        Ok(Self::new(app_key, app_secret).with_account_no(account_no))
    }

    /// Like [`Credentials::from_env`], returning `None` if a variable is missing.
    pub fn try_from_env() -> Option<Self> {
        Self::from_env().ok()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("app_key", &self.app_key)
            .field("app_secret", &"[REDACTED]")
            .field("account_no", &self.account_no)
            .finish()
    }
}

/// Read a previously issued access token from `KIS_ACCESS_TOKEN`.
///
/// Returns `None` if the variable is unset or empty.
pub fn access_token_from_env() -> Option<String> {
    std::env::var(ACCESS_TOKEN_VAR)
        .ok()
        .filter(|token| !token.is_empty())
}
