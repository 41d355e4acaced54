//! HTTP transport layer for the exporter.
//!
//! Issues single authenticated requests and hands back the raw status,
//! headers and body. Status interpretation lives in the rate-limit governor.

use crate::errors::{ExportError, ExportResult, NetworkError, ResponseError};
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, instrument};

/// HTTP transport trait for making API requests
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform one GET request
    async fn get(&self, request: GetRequest) -> ExportResult<RawResponse>;

    /// Perform one POST request with a JSON body
    async fn post_json(&self, request: PostRequest) -> ExportResult<RawResponse>;
}

/// GET request with query parameters
#[derive(Debug, Clone)]
pub struct GetRequest {
    /// Target URL
    pub url: String,
    /// Request headers
    pub headers: HeaderMap,
    /// Query parameters, in order
    pub query: Vec<(String, String)>,
    /// Request timeout
    pub timeout: Option<Duration>,
}

impl GetRequest {
    /// Create a new GET request
    pub fn new(url: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            url: url.into(),
            headers,
            query: Vec::new(),
            timeout: None,
        }
    }

    /// Add a query parameter
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Add several query parameters
    pub fn params(mut self, params: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(params);
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Look up a query parameter by name
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// POST request with a JSON payload
#[derive(Debug, Clone)]
pub struct PostRequest {
    /// Target URL
    pub url: String,
    /// Request body
    pub body: serde_json::Value,
    /// Request timeout
    pub timeout: Option<Duration>,
}

impl PostRequest {
    /// Create a new POST request
    pub fn new(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            url: url.into(),
            body,
            timeout: None,
        }
    }
}

/// Raw HTTP response
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
}

impl RawResponse {
    /// Create a new response
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Canonical reason phrase for the status
    pub fn reason(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("Unknown")
    }

    /// `Retry-After` header in whole seconds, if present and numeric
    pub fn retry_after_secs(&self) -> Option<u64> {
        self.headers
            .get(http::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
    }

    /// Parse the body as JSON
    pub fn json(&self) -> ExportResult<serde_json::Value> {
        serde_json::from_slice(&self.body)
            .map_err(|e| ExportError::Response(ResponseError::from(e)))
    }
}

/// Default HTTP transport implementation using reqwest
pub struct ReqwestTransport {
    client: Client,
    default_timeout: Duration,
}

impl ReqwestTransport {
    /// Create a new transport with the given timeout
    pub fn new(timeout: Duration) -> ExportResult<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| ExportError::Network(NetworkError::Http(e.to_string())))?;

        Ok(Self {
            client,
            default_timeout: timeout,
        })
    }

    async fn read_response(response: reqwest::Response) -> ExportResult<RawResponse> {
        let status = response.status();
        let headers = response.headers().clone();

        // A truncated or interrupted body surfaces here as a transient failure.
        let body = response
            .bytes()
            .await
            .map_err(|e| ExportError::Network(NetworkError::from(e)))?;

        debug!(status = %status, body_len = body.len(), "Received response");

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn get(&self, request: GetRequest) -> ExportResult<RawResponse> {
        let timeout = request.timeout.unwrap_or(self.default_timeout);

        let response = self
            .client
            .request(Method::GET, &request.url)
            .headers(request.headers)
            .query(&request.query)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ExportError::Network(NetworkError::from(e)))?;

        Self::read_response(response).await
    }

    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn post_json(&self, request: PostRequest) -> ExportResult<RawResponse> {
        let timeout = request.timeout.unwrap_or(self.default_timeout);

        let response = self
            .client
            .post(&request.url)
            .json(&request.body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ExportError::Network(NetworkError::from(e)))?;

        Self::read_response(response).await
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("default_timeout", &self.default_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_get_request_builder() {
        let request = GetRequest::new("https://slack.com/api/users.list", HeaderMap::new())
            .param("limit", "200")
            .params(vec![("cursor".to_string(), "abc".to_string())]);

        assert_eq!(request.url, "https://slack.com/api/users.list");
        assert_eq!(request.query.len(), 2);
        assert_eq!(request.query_value("cursor"), Some("abc"));
        assert_eq!(request.query_value("missing"), None);
    }

    #[test]
    fn test_retry_after_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::RETRY_AFTER, HeaderValue::from_static("7"));
        let response = RawResponse::new(StatusCode::TOO_MANY_REQUESTS, headers, "");
        assert_eq!(response.retry_after_secs(), Some(7));
        assert_eq!(response.reason(), "Too Many Requests");

        let mut headers = HeaderMap::new();
        headers.insert(http::header::RETRY_AFTER, HeaderValue::from_static("soon"));
        let response = RawResponse::new(StatusCode::TOO_MANY_REQUESTS, headers, "");
        assert_eq!(response.retry_after_secs(), None);
    }

    #[test]
    fn test_json_body() {
        let response = RawResponse::new(StatusCode::OK, HeaderMap::new(), r#"{"ok":true}"#);
        assert_eq!(response.json().unwrap()["ok"], true);

        let response = RawResponse::new(StatusCode::OK, HeaderMap::new(), "<html>");
        assert!(matches!(response.json(), Err(ExportError::Response(_))));
    }
}
