//! OAuth2 token issuance.

mod types;

pub use types::*;

use reqwest::Method;

use crate::context::RequestContext;
use crate::error::KisError;
use crate::rest::endpoints::oauth2;
use crate::rest::{KisClient, Response};

impl KisClient {
    /// Issue a new access token using the client-credentials grant.
    ///
    /// Every call issues a brand-new token; nothing is cached or refreshed.
    /// Install the result with [`KisClient::with_access_token`].
    pub async fn issue_token(
        &self,
        ctx: &RequestContext,
    ) -> Result<(TokenResponse, Response), KisError> {
        let credentials = self.credentials();
        let body = TokenRequest {
            grant_type: CLIENT_CREDENTIALS,
            appkey: &credentials.app_key,
            appsecret: credentials.expose_secret(),
        };
        let request = self.new_request_with_body(Method::POST, oauth2::TOKEN, &body)?;
        self.execute_and_decode(ctx, request).await
    }
}
