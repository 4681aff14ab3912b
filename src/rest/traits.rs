//! Trait definition for the KIS REST API client.
//!
//! The `KisApi` trait abstracts the endpoint operations so that callers can
//! substitute mock implementations in tests or wrap the client in decorators.
//!
//! # Example
//!
//! ```rust,ignore
//! use kis_api_client::context::RequestContext;
//! use kis_api_client::rest::KisApi;
//! use kis_api_client::rest::domestic_stock::InquirePriceRequest;
//!
//! async fn last_price<C: KisApi>(client: &C) -> Result<String, kis_api_client::KisError> {
//!     let ctx = RequestContext::background();
//!     let (price, _) = client
//!         .inquire_price(&ctx, &InquirePriceRequest::new("J", "000660"))
//!         .await?;
//!     Ok(price.output.stck_prpr)
//! }
//! ```

use std::future::Future;

use crate::context::RequestContext;
use crate::error::KisError;
use crate::rest::Response;
use crate::rest::domestic_stock::{
    InquireDailyPriceRequest, InquireDailyPriceResponse, InquirePriceRequest, InquirePriceResponse,
};
use crate::rest::oauth2::TokenResponse;

/// Trait defining the KIS REST API operations.
///
/// All methods are async and return the decoded payload together with the
/// response envelope.
pub trait KisApi: Send + Sync {
    /// Issue a new access token.
    fn issue_token(
        &self,
        ctx: &RequestContext,
    ) -> impl Future<Output = Result<(TokenResponse, Response), KisError>> + Send;

    /// Get the current price of a domestic stock.
    fn inquire_price(
        &self,
        ctx: &RequestContext,
        request: &InquirePriceRequest,
    ) -> impl Future<Output = Result<(InquirePriceResponse, Response), KisError>> + Send;

    /// Get price history of a domestic stock.
    fn inquire_daily_price(
        &self,
        ctx: &RequestContext,
        request: &InquireDailyPriceRequest,
    ) -> impl Future<Output = Result<(InquireDailyPriceResponse, Response), KisError>> + Send;
}

impl KisApi for crate::rest::KisClient {
    async fn issue_token(
        &self,
        ctx: &RequestContext,
    ) -> Result<(TokenResponse, Response), KisError> {
        crate::rest::KisClient::issue_token(self, ctx).await
    }

    async fn inquire_price(
        &self,
        ctx: &RequestContext,
        request: &InquirePriceRequest,
    ) -> Result<(InquirePriceResponse, Response), KisError> {
        crate::rest::KisClient::inquire_price(self, ctx, request).await
    }

    async fn inquire_daily_price(
        &self,
        ctx: &RequestContext,
        request: &InquireDailyPriceRequest,
    ) -> Result<(InquireDailyPriceResponse, Response), KisError> {
        crate::rest::KisClient::inquire_daily_price(self, ctx, request).await
    }
}
