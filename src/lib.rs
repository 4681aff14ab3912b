//! # KIS API Client
//!
//! An async Rust client library for the Korea Investment & Securities Open API.
//!
//! ## Features
//!
//! - OAuth2 access token issuance
//! - Domestic stock current price and price history quotations
//! - Per-call cancellation and deadlines through [`context::RequestContext`]
//! - Strong typing for request parameters and response payloads
//! - Structured errors that keep the raw response for inspection
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kis_api_client::auth::Credentials;
//! use kis_api_client::context::RequestContext;
//! use kis_api_client::rest::KisClient;
//! use kis_api_client::rest::domestic_stock::InquireDailyPriceRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = RequestContext::background();
//!     let client = KisClient::new(Credentials::from_env()?)?;
//!     let (token, _) = client.issue_token(&ctx).await?;
//!     let client = client.with_access_token(token.access_token);
//!
//!     let request = InquireDailyPriceRequest::new("J", "000660");
//!     let (history, _) = client.inquire_daily_price(&ctx, &request).await?;
//!     for day in &history.output {
//!         println!("{} close={}", day.stck_bsop_date, day.stck_clpr);
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod context;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use context::{CancelHandle, RequestContext};
pub use error::{ErrorResponse, KisError};
pub use rest::{KisClient, Response};

/// Result type alias using KisError
pub type Result<T> = std::result::Result<T, KisError>;
