//! Response envelope.

use std::borrow::Cow;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use url::Url;

use crate::error::KisError;

/// A completed HTTP response with its body fully buffered.
///
/// The body can be read any number of times, including from the
/// [`ErrorResponse`](crate::error::ErrorResponse) of a failed call.
#[derive(Debug, Clone)]
pub struct Response {
    method: Method,
    url: Url,
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Response {
    /// Assemble a response from its parts.
    pub fn new(
        method: Method,
        url: Url,
        status: StatusCode,
        headers: HeaderMap,
        body: Vec<u8>,
    ) -> Self {
        Self {
            method,
            url,
            status,
            headers,
            body,
        }
    }

    /// Method of the request that produced this response.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// URL of the request that produced this response.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Whether the status is in 200–299.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Decode the body as JSON.
    ///
    /// An empty or whitespace-only body decodes to `T::default()`.
    pub fn json<T>(&self) -> Result<T, KisError>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Consume the response, returning the body bytes.
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}
