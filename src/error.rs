//! Error types for the KIS client library.

use thiserror::Error;

use crate::rest::Response;

/// The main error type for all KIS client operations.
#[derive(Error, Debug)]
pub enum KisError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A 2xx body could not be decoded into the payload type
    #[error("Failed to decode {} {} response: {source}", .response.method(), .response.url())]
    Decode {
        /// The underlying decode error
        source: serde_json::Error,
        /// The response whose body failed to decode
        response: Box<Response>,
    },

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// A header value could not be encoded
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// KIS returned a non-2xx status
    #[error("KIS API error: {0}")]
    Api(Box<ErrorResponse>),

    /// The request could not be constructed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A payload field could not be parsed into a typed value
    #[error("Invalid value for {field}: {value:?}")]
    InvalidValue {
        /// Name of the wire field
        field: &'static str,
        /// The raw text that failed to parse
        value: String,
    },

    /// Writing the response body to a caller-supplied sink failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The request context was cancelled
    #[error("Request cancelled")]
    Cancelled,

    /// The request context deadline passed
    #[error("Request timed out")]
    Timeout,

    /// A required environment variable is not set
    #[error("Missing environment variable: {0}")]
    MissingEnv(String),
}

impl KisError {
    /// Returns the provider error record if this is an [`KisError::Api`] error.
    pub fn api_error(&self) -> Option<&ErrorResponse> {
        match self {
            KisError::Api(err) => Some(err),
            _ => None,
        }
    }

    /// The response attached to this error, if one was received.
    pub fn response(&self) -> Option<&Response> {
        match self {
            KisError::Api(err) => Some(err.response()),
            KisError::Decode { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Whether this error was produced by the request context rather than the transport.
    pub fn is_context_error(&self) -> bool {
        matches!(self, KisError::Cancelled | KisError::Timeout)
    }
}

/// Error record for a response whose status falls outside 200–299.
///
/// The fields are decoded best-effort from the body, each on its own; a field
/// that is missing or not a string is left empty. The full response, including the
/// original body bytes, stays available through [`ErrorResponse::response`].
#[derive(Debug, Clone)]
pub struct ErrorResponse {
    response: Response,
    /// Provider error code (e.g. "EGW00123").
    pub error_code: String,
    /// Human-readable description.
    pub error_description: String,
}

impl ErrorResponse {
    /// Build an error record from a buffered response.
    pub fn from_response(response: Response) -> Self {
        let body: serde_json::Value =
            serde_json::from_slice(response.body()).unwrap_or_default();
        let field = |name: &str| {
            body.get(name)
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            error_code: field("error_code"),
            error_description: field("error_description"),
            response,
        }
    }

    /// The response that produced this error.
    pub fn response(&self) -> &Response {
        &self.response
    }

    /// HTTP status code of the response.
    pub fn status(&self) -> reqwest::StatusCode {
        self.response.status()
    }

    /// Consume the error, returning the response.
    pub fn into_response(self) -> Response {
        self.response
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}: {} {} {}",
            self.response.method(),
            self.response.url(),
            self.response.status().as_u16(),
            self.error_code,
            self.error_description
        )
    }
}

impl From<ErrorResponse> for KisError {
    fn from(err: ErrorResponse) -> Self {
        KisError::Api(Box::new(err))
    }
}

/// Error codes KIS is known to return in `error_code`.
pub mod error_codes {
    /// Access token expired.
    pub const TOKEN_EXPIRED: &str = "EGW00123";
    /// Access token invalid.
    pub const TOKEN_INVALID: &str = "EGW00121";
    /// Token issuance requested more than once per minute.
    pub const TOKEN_RATE_LIMITED: &str = "EGW00133";
    /// Transaction-per-second limit exceeded.
    pub const TPS_EXCEEDED: &str = "EGW00201";
}
