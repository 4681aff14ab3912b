//! KIS REST API client implementation.

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::auth::Credentials;
use crate::context::RequestContext;
use crate::error::{ErrorResponse, KisError};
use crate::rest::endpoints::KIS_BASE_URL;
use crate::rest::request::ApiRequest;
use crate::rest::response::Response;

/// Content type KIS expects on protected calls.
const PROTECTED_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// The KIS REST API client.
///
/// Holds the base URL, the shared HTTP transport and an immutable credential
/// snapshot. Installing an access token with [`KisClient::with_access_token`]
/// yields a new client value; the original is left untouched, so concurrent
/// calls never observe a half-updated credential set. Cloning is cheap and
/// shares the underlying connection pool.
///
/// # Example
///
/// ```rust,no_run
/// use kis_api_client::auth::Credentials;
/// use kis_api_client::context::RequestContext;
/// use kis_api_client::rest::KisClient;
/// use kis_api_client::rest::domestic_stock::InquirePriceRequest;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let ctx = RequestContext::background();
///     let client = KisClient::new(Credentials::from_env()?)?;
///
///     let (token, _) = client.issue_token(&ctx).await?;
///     let client = client.with_access_token(token.access_token);
///
///     let (price, _) = client
///         .inquire_price(&ctx, &InquirePriceRequest::new("J", "000660"))
///         .await?;
///     println!("{}: {}", price.output.bstp_kor_isnm, price.output.stck_prpr);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct KisClient {
    http_client: ClientWithMiddleware,
    base_url: Url,
    credentials: Arc<Credentials>,
    access_token: Option<SecretString>,
    user_agent: Option<HeaderValue>,
    debug: bool,
}

impl KisClient {
    /// Create a client for the production API with default settings.
    pub fn new(credentials: Credentials) -> Result<Self, KisError> {
        Self::builder().credentials(credentials).build()
    }

    /// Create a new client builder.
    pub fn builder() -> KisClientBuilder {
        KisClientBuilder::new()
    }

    /// Return a copy of this client that sends `token` as its bearer credential.
    pub fn with_access_token(&self, token: impl Into<String>) -> Self {
        Self {
            access_token: Some(SecretString::from(token.into())),
            ..self.clone()
        }
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The credentials this client was built with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Whether an access token is installed.
    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// Whether outgoing requests are logged as curl commands.
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Build a request without a body.
    ///
    /// `path` is resolved against the base URL as a relative reference.
    pub fn new_request(&self, method: Method, path: &str) -> Result<ApiRequest, KisError> {
        let url = self.base_url.join(path)?;
        let mut request = ApiRequest::new(method, url);
        if let Some(user_agent) = &self.user_agent {
            request.headers_mut().insert(USER_AGENT, user_agent.clone());
        }
        Ok(request)
    }

    /// Build a request carrying `body` encoded as JSON.
    pub fn new_request_with_body<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<ApiRequest, KisError>
    where
        B: serde::Serialize + ?Sized,
    {
        let mut request = self.new_request(method, path)?;
        request.set_body(serde_json::to_vec(body)?);
        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(request)
    }

    /// Build a request to a protected endpoint.
    ///
    /// Attaches the transaction ID, app key, app secret, bearer token and
    /// content type from this client's credential snapshot. No credential
    /// is validated; a missing token is sent as an empty bearer value.
    pub fn new_protected_request(
        &self,
        method: Method,
        path: &str,
        tr_id: &str,
    ) -> Result<ApiRequest, KisError> {
        let token = match &self.access_token {
            Some(token) => token.expose_secret(),
            None => {
                tracing::warn!(path, tr_id, "No access token installed on KIS client");
                ""
            }
        };

        self.new_request(method, path)?
            .with_header("tr_id", tr_id)?
            .with_header("appkey", &self.credentials.app_key)?
            .with_sensitive_header("appsecret", self.credentials.expose_secret())?
            .with_sensitive_header("authorization", &format!("Bearer {token}"))?
            .with_header("content-type", PROTECTED_CONTENT_TYPE)
    }

    /// Make a protected GET request with query parameters and decode the payload.
    pub(crate) async fn protected_get<T, Q>(
        &self,
        ctx: &RequestContext,
        path: &str,
        tr_id: &str,
        params: &Q,
    ) -> Result<(T, Response), KisError>
    where
        T: serde::de::DeserializeOwned + Default,
        Q: serde::Serialize + ?Sized,
    {
        let request = self
            .new_protected_request(Method::GET, path, tr_id)?
            .with_query(params)?;
        self.execute_and_decode(ctx, request).await
    }

    /// Send a request and classify the response.
    ///
    /// The body is always buffered. Statuses outside 200–299 are returned as
    /// [`KisError::Api`] with the body preserved. If the transport fails after
    /// `ctx` is done, the context's error is reported instead.
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        request: ApiRequest,
    ) -> Result<Response, KisError> {
        if self.debug {
            tracing::debug!(curl = %request.to_curl_command(), "KIS request");
        }

        let method = request.method().clone();
        let url = request.url().clone();

        let sent = ctx.run(self.http_client.execute(request.into_reqwest())).await?;
        let response = match sent {
            Ok(response) => response,
            Err(e) => return Err(ctx.err().unwrap_or_else(|| e.into())),
        };

        let status = response.status();
        let headers = response.headers().clone();
        let body = match ctx.run(response.bytes()).await? {
            Ok(body) => body.to_vec(),
            Err(e) => return Err(ctx.err().unwrap_or_else(|| e.into())),
        };

        let response = Response::new(method, url, status, headers, body);
        if response.is_success() {
            Ok(response)
        } else {
            tracing::debug!(%status, url = %response.url(), "KIS returned error status");
            Err(ErrorResponse::from_response(response).into())
        }
    }

    /// Send a request and decode the JSON body into `T`.
    ///
    /// An empty body decodes to `T::default()`. A body that fails to decode
    /// yields [`KisError::Decode`], which still carries the response.
    pub async fn execute_and_decode<T>(
        &self,
        ctx: &RequestContext,
        request: ApiRequest,
    ) -> Result<(T, Response), KisError>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        let response = self.execute(ctx, request).await?;
        match response.json() {
            Ok(value) => Ok((value, response)),
            Err(KisError::Json(source)) => Err(KisError::Decode {
                source,
                response: Box::new(response),
            }),
            Err(e) => Err(e),
        }
    }

    /// Send a request and copy the raw body into `writer`.
    pub async fn execute_into_writer<W>(
        &self,
        ctx: &RequestContext,
        request: ApiRequest,
        writer: &mut W,
    ) -> Result<Response, KisError>
    where
        W: std::io::Write + ?Sized,
    {
        let response = self.execute(ctx, request).await?;
        writer.write_all(response.body())?;
        Ok(response)
    }
}

impl std::fmt::Debug for KisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KisClient")
            .field("base_url", &self.base_url.as_str())
            .field("credentials", &self.credentials)
            .field("has_access_token", &self.access_token.is_some())
            .field("debug", &self.debug)
            .finish()
    }
}

/// Builder for [`KisClient`].
pub struct KisClientBuilder {
    base_url: String,
    credentials: Option<Credentials>,
    access_token: Option<String>,
    user_agent: Option<String>,
    debug: bool,
    http_client: Option<reqwest::Client>,
}

impl KisClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: KIS_BASE_URL.to_string(),
            credentials: None,
            access_token: None,
            user_agent: None,
            debug: false,
            http_client: None,
        }
    }

    /// Set the base URL (useful for paper trading or a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the application credentials.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Install a previously issued access token.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set a custom user agent. An empty string disables the header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Log every outgoing request as a curl command at `debug` level.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Use a preconfigured `reqwest` client as the transport.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<KisClient, KisError> {
        let base_url = Url::parse(&self.base_url)?;

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("kis-api-client/{}", env!("CARGO_PKG_VERSION")));
        let user_agent = if user_agent.is_empty() {
            None
        } else {
            Some(HeaderValue::from_str(&user_agent)?)
        };

        let reqwest_client = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder().build()?,
        };
        let http_client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        Ok(KisClient {
            http_client,
            base_url,
            credentials: Arc::new(
                self.credentials
                    .unwrap_or_else(|| Credentials::new("", "")),
            ),
            access_token: self.access_token.map(SecretString::from),
            user_agent,
            debug: self.debug,
        })
    }
}

impl Default for KisClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> KisClient {
        KisClient::builder()
            .credentials(Credentials::new("key", "secret"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_request_resolves_relative_path() {
        let req = client().new_request(Method::POST, "oauth2/tokenP").unwrap();
        assert_eq!(
            req.url().as_str(),
            "https://openapi.koreainvestment.com:9443/oauth2/tokenP"
        );
        assert!(req.body().is_none());
        assert!(req.headers().get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_new_request_sets_default_user_agent() {
        let req = client().new_request(Method::GET, "/x").unwrap();
        let ua = req.headers().get(USER_AGENT).unwrap().to_str().unwrap();
        assert!(ua.starts_with("kis-api-client/"));
    }

    #[test]
    fn test_empty_user_agent_disables_header() {
        let client = KisClient::builder().user_agent("").build().unwrap();
        let req = client.new_request(Method::GET, "/x").unwrap();
        assert!(req.headers().get(USER_AGENT).is_none());
    }

    #[test]
    fn test_new_request_with_body_is_unescaped_json() {
        let body = serde_json::json!({ "note": "<a&b>" });
        let req = client()
            .new_request_with_body(Method::POST, "oauth2/tokenP", &body)
            .unwrap();
        assert_eq!(req.body().unwrap(), br#"{"note":"<a&b>"}"#);
        assert_eq!(req.headers().get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_new_request_bad_path() {
        let err = client().new_request(Method::GET, "http://[::1").unwrap_err();
        assert!(matches!(err, KisError::Url(_)));
    }

    #[test]
    fn test_build_rejects_bad_base_url() {
        let err = KisClient::builder().base_url("not a url").build().unwrap_err();
        assert!(matches!(err, KisError::Url(_)));
    }

    #[test]
    fn test_with_access_token_leaves_original_untouched() {
        let original = client();
        let authed = original.with_access_token("token");
        assert!(!original.has_access_token());
        assert!(authed.has_access_token());
    }

    #[test]
    fn test_protected_request_headers() {
        let req = client()
            .with_access_token("token")
            .new_protected_request(Method::GET, "/uapi/x", "FHKST01010100")
            .unwrap();
        let headers = req.headers();
        assert_eq!(headers["tr_id"], "FHKST01010100");
        assert_eq!(headers["appkey"], "key");
        assert_eq!(headers["appsecret"], "secret");
        assert_eq!(headers["authorization"], "Bearer token");
        assert_eq!(headers["content-type"], "application/json; charset=utf-8");
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let debug_str = format!("{:?}", client().with_access_token("token-value"));
        assert!(!debug_str.contains("secret\""));
        assert!(!debug_str.contains("token-value"));
        assert!(debug_str.contains("has_access_token: true"));
    }
}
