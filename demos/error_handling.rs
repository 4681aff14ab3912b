//! Example: Working with KisError and ErrorResponse.
//!
//! Sends a quotation request without a valid token and inspects the failure.
//!
//! Run with: cargo run --example error_handling

use kis_api_client::KisError;
use kis_api_client::auth::Credentials;
use kis_api_client::context::RequestContext;
use kis_api_client::error::error_codes;
use kis_api_client::rest::KisClient;
use kis_api_client::rest::domestic_stock::InquirePriceRequest;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = KisClient::new(Credentials::new("invalid-key", "invalid-secret"))?
        .with_access_token("invalid-token");

    let ctx = RequestContext::background();
    let request = InquirePriceRequest::new("J", "000660");
    match client.inquire_price(&ctx, &request).await {
        Ok((price, _)) => println!("Unexpected success: rt_cd={}", price.rt_cd),
        Err(KisError::Api(err)) => {
            println!("API error: {}", err);
            println!("Status: {}", err.status());
            println!("Raw body: {}", err.response().text());
            if err.error_code == error_codes::TOKEN_INVALID
                || err.error_code == error_codes::TOKEN_EXPIRED
            {
                println!("Token needs to be reissued");
            }
        }
        Err(err) if err.is_context_error() => println!("Context ended: {}", err),
        Err(err) => println!("Transport error: {}", err),
    }

    Ok(())
}
