//! Authentication module for the KIS API.
//!
//! This module provides credential management with secure secret storage and
//! environment-variable loading. Token issuance lives on the client, see
//! [`KisClient::issue_token`](crate::rest::KisClient::issue_token).

mod credentials;

pub use credentials::{
    ACCESS_TOKEN_VAR, ACCOUNT_NO_VAR, APP_KEY_VAR, APP_SECRET_VAR, Credentials,
    access_token_from_env,
};
