//! Example: Fetching domestic stock quotations from KIS.
//!
//! Reads `KIS_APP_KEY` and `KIS_APP_SECRET` (and optionally `KIS_ACCESS_TOKEN`)
//! from the environment or a `.env` file.
//!
//! Run with: RUST_LOG=kis_api_client=debug cargo run --example quotations

use std::time::Duration;

use kis_api_client::auth::{Credentials, access_token_from_env};
use kis_api_client::context::RequestContext;
use kis_api_client::rest::KisClient;
use kis_api_client::rest::domestic_stock::{
    InquireDailyPriceRequest, InquirePriceRequest, MARKET_STOCK, PeriodDivCode,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = KisClient::builder()
        .credentials(Credentials::from_env()?)
        .debug(true)
        .build()?;

    let ctx = RequestContext::background().with_timeout(Duration::from_secs(10));

    // Issue a token unless one was supplied
    let client = match access_token_from_env() {
        Some(token) => client.with_access_token(token),
        None => {
            println!("=== Access Token ===");
            let (token, _) = client.issue_token(&ctx).await?;
            println!("Type: {}", token.token_type);
            println!("Expires after: {:?}", token.expires_after());
            client.with_access_token(token.access_token)
        }
    };

    println!("\n=== Current Price ===");
    let request = InquirePriceRequest::new(MARKET_STOCK, "000660");
    let (price, _) = client.inquire_price(&ctx, &request).await?;
    if !price.is_success() {
        println!("KIS reported {}: {}", price.msg_cd, price.msg1);
        return Ok(());
    }
    println!("Industry: {}", price.output.bstp_kor_isnm);
    println!("Price: {} ({}%)", price.output.stck_prpr, price.output.prdy_ctrt);
    println!("52w high/low: {} / {}", price.output.w52_hgpr, price.output.w52_lwpr);

    println!("\n=== Weekly History ===");
    let request = InquireDailyPriceRequest::new(MARKET_STOCK, "000660").period(PeriodDivCode::Week);
    let (history, _) = client.inquire_daily_price(&ctx, &request).await?;
    for week in history.output.iter().take(5) {
        println!(
            "{}  O {}  H {}  L {}  C {}  V {}",
            week.stck_bsop_date,
            week.stck_oprc,
            week.stck_hgpr,
            week.stck_lwpr,
            week.stck_clpr,
            week.acml_vol
        );
    }

    Ok(())
}
