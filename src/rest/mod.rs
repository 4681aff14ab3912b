//! KIS REST API client.
//!
//! [`KisClient`] is the transport core: it resolves paths against the base
//! URL, attaches credentials, executes requests under a
//! [`RequestContext`](crate::context::RequestContext) and decodes responses.
//! Endpoint families are implemented on the client in submodules:
//!
//! - [`oauth2`] - access token issuance
//! - [`domestic_stock`] - domestic stock quotations
//!
//! # Trait-based API
//!
//! The [`KisApi`] trait abstracts the endpoint operations, enabling mock
//! implementations and decorators.

mod client;
pub mod domestic_stock;
mod endpoints;
pub mod oauth2;
mod request;
mod response;
mod traits;

pub use client::{KisClient, KisClientBuilder};
pub use endpoints::*;
pub use request::ApiRequest;
pub use response::Response;
pub use traits::KisApi;
