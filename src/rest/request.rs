//! Outgoing request descriptor.

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::error::KisError;

/// Header names and JSON body keys whose values never appear in logs.
const SECRET_KEYS: &[&str] = &["appsecret", "authorization"];

/// A fully described HTTP request, built by [`KisClient::new_request`].
///
/// Consumed once by one of the `execute*` methods.
///
/// [`KisClient::new_request`]: crate::rest::KisClient::new_request
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl ApiRequest {
    pub(crate) fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub(crate) fn set_body(&mut self, body: Vec<u8>) {
        self.body = Some(body);
    }

    /// Replace the query string with the URL-encoded form of `params`.
    pub fn with_query<Q>(mut self, params: &Q) -> Result<Self, KisError>
    where
        Q: serde::Serialize + ?Sized,
    {
        let query = serde_urlencoded::to_string(params)
            .map_err(|e| KisError::InvalidRequest(e.to_string()))?;
        if query.is_empty() {
            self.url.set_query(None);
        } else {
            self.url.set_query(Some(&query));
        }
        Ok(self)
    }

    /// Set a header, replacing any existing value.
    pub fn with_header(mut self, name: &'static str, value: &str) -> Result<Self, KisError> {
        let value = HeaderValue::from_str(value)?;
        self.headers.insert(HeaderName::from_static(name), value);
        Ok(self)
    }

    /// Set a header marked sensitive, so it is hidden from `Debug` output.
    pub fn with_sensitive_header(
        mut self,
        name: &'static str,
        value: &str,
    ) -> Result<Self, KisError> {
        let mut value = HeaderValue::from_str(value)?;
        value.set_sensitive(true);
        self.headers.insert(HeaderName::from_static(name), value);
        Ok(self)
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Resolved URL including the query string.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub(crate) fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Encoded body, if any.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Render the request as a shell-ready curl command.
    ///
    /// Secrets (`appsecret`, `authorization`) in headers and in a JSON object
    /// body are replaced with `[REDACTED]`.
    pub fn to_curl_command(&self) -> String {
        let mut parts = vec![
            "curl".to_string(),
            "-X".to_string(),
            shell_quote(self.method.as_str()),
        ];

        let mut names: Vec<&HeaderName> = self.headers.keys().collect();
        names.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        for name in names {
            for value in self.headers.get_all(name) {
                let rendered = if SECRET_KEYS.contains(&name.as_str()) {
                    "[REDACTED]".into()
                } else {
                    String::from_utf8_lossy(value.as_bytes())
                };
                parts.push("-H".to_string());
                parts.push(shell_quote(&format!("{}: {}", name, rendered)));
            }
        }

        if let Some(body) = &self.body {
            parts.push("-d".to_string());
            parts.push(shell_quote(&redact_body(body)));
        }

        parts.push(shell_quote(self.url.as_str()));
        parts.join(" ")
    }

    pub(crate) fn into_reqwest(self) -> reqwest::Request {
        let mut request = reqwest::Request::new(self.method, self.url);
        *request.headers_mut() = self.headers;
        if let Some(body) = self.body {
            *request.body_mut() = Some(body.into());
        }
        request
    }
}

fn redact_body(body: &[u8]) -> String {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(mut map)) => {
            for key in SECRET_KEYS {
                if let Some(value) = map.get_mut(*key) {
                    *value = "[REDACTED]".into();
                }
            }
            serde_json::Value::Object(map).to_string()
        }
        _ => String::from_utf8_lossy(body).into_owned(),
    }
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ApiRequest {
        ApiRequest::new(
            Method::GET,
            Url::parse("https://openapi.koreainvestment.com:9443/uapi/domestic-stock/v1/quotations/inquire-price")
                .unwrap(),
        )
    }

    #[derive(serde::Serialize)]
    struct Params<'a> {
        #[serde(rename = "FID_COND_MRKT_DIV_CODE")]
        market: &'a str,
        #[serde(rename = "FID_INPUT_ISCD")]
        code: &'a str,
    }

    #[test]
    fn test_with_query_encodes_params() {
        let req = request()
            .with_query(&Params {
                market: "J",
                code: "000660",
            })
            .unwrap();
        assert_eq!(req.url().query(), Some("FID_COND_MRKT_DIV_CODE=J&FID_INPUT_ISCD=000660"));
    }

    #[test]
    fn test_with_query_escapes_values() {
        let req = request()
            .with_query(&Params {
                market: "a&b",
                code: "x y",
            })
            .unwrap();
        assert_eq!(req.url().query(), Some("FID_COND_MRKT_DIV_CODE=a%26b&FID_INPUT_ISCD=x+y"));
    }

    #[test]
    fn test_invalid_header_value() {
        let err = request().with_header("appkey", "bad\nvalue").unwrap_err();
        assert!(matches!(err, KisError::InvalidHeader(_)));
    }

    #[test]
    fn test_sensitive_header_hidden_from_debug() {
        let req = request()
            .with_sensitive_header("appsecret", "very-secret")
            .unwrap();
        assert!(!format!("{:?}", req).contains("very-secret"));
    }

    #[test]
    fn test_curl_command_redacts_secrets() {
        let mut req = request()
            .with_header("tr_id", "FHKST01010100")
            .unwrap()
            .with_header("appkey", "key")
            .unwrap()
            .with_sensitive_header("appsecret", "secret")
            .unwrap()
            .with_sensitive_header("authorization", "Bearer token")
            .unwrap();
        req.set_body(br#"{"note":"it's"}"#.to_vec());

        let curl = req.to_curl_command();
        assert!(curl.starts_with("curl -X 'GET' "));
        assert!(curl.contains("-H 'appkey: key'"));
        assert!(curl.contains("-H 'tr_id: FHKST01010100'"));
        assert!(curl.contains("-H 'appsecret: [REDACTED]'"));
        assert!(curl.contains("-H 'authorization: [REDACTED]'"));
        assert!(!curl.contains("secret'"));
        assert!(!curl.contains("Bearer token"));
        assert!(curl.contains(r#"-d '{"note":"it'\''s"}'"#));
        assert!(curl.ends_with("'https://openapi.koreainvestment.com:9443/uapi/domestic-stock/v1/quotations/inquire-price'"));
    }

    #[test]
    fn test_curl_command_redacts_body_secret() {
        let mut req = ApiRequest::new(
            Method::POST,
            Url::parse("https://openapi.koreainvestment.com:9443/oauth2/tokenP").unwrap(),
        );
        req.set_body(br#"{"appkey":"key","appsecret":"hunter2"}"#.to_vec());

        let curl = req.to_curl_command();
        assert!(curl.contains(r#""appsecret":"[REDACTED]""#));
        assert!(curl.contains(r#""appkey":"key""#));
        assert!(!curl.contains("hunter2"));
    }
}
