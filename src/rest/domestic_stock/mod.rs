//! Domestic stock quotation endpoints.
//!
//! These calls never inspect `rt_cd`, `msg_cd` or `msg1`. KIS can report an
//! application-level failure inside a 2xx response, so callers should check
//! [`InquirePriceResponse::is_success`] (or the raw fields) themselves.

mod types;

pub use types::*;

use crate::context::RequestContext;
use crate::error::KisError;
use crate::rest::endpoints::{domestic_stock, tr_id};
use crate::rest::{KisClient, Response};

impl KisClient {
    /// Get the current price of a domestic stock.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use kis_api_client::context::RequestContext;
    /// use kis_api_client::rest::KisClient;
    /// use kis_api_client::rest::domestic_stock::{InquirePriceRequest, MARKET_STOCK};
    ///
    /// # async fn run(client: KisClient) -> Result<(), kis_api_client::KisError> {
    /// let ctx = RequestContext::background();
    /// let request = InquirePriceRequest::new(MARKET_STOCK, "000660");
    /// let (price, _) = client.inquire_price(&ctx, &request).await?;
    /// if price.is_success() {
    ///     println!("{}", price.output.stck_prpr);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn inquire_price(
        &self,
        ctx: &RequestContext,
        request: &InquirePriceRequest,
    ) -> Result<(InquirePriceResponse, Response), KisError> {
        self.protected_get(ctx, domestic_stock::INQUIRE_PRICE, tr_id::INQUIRE_PRICE, request)
            .await
    }

    /// Get daily, weekly or monthly price history of a domestic stock.
    ///
    /// Records are returned in the order KIS sends them, most recent first.
    pub async fn inquire_daily_price(
        &self,
        ctx: &RequestContext,
        request: &InquireDailyPriceRequest,
    ) -> Result<(InquireDailyPriceResponse, Response), KisError> {
        self.protected_get(
            ctx,
            domestic_stock::INQUIRE_DAILY_PRICE,
            tr_id::INQUIRE_DAILY_PRICE,
            request,
        )
        .await
    }
}
