//! Mock implementations for testing.
//!
//! Provides a scripted transport that replays queued responses and records
//! every request it receives.

use crate::errors::{ExportError, ExportResult, NetworkError};
use crate::transport::{GetRequest, HttpTransport, PostRequest, RawResponse};
use async_trait::async_trait;
use http::{HeaderMap, HeaderValue, StatusCode};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

/// Mock response configuration
#[derive(Debug)]
pub struct MockResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: String,
    /// Transport failure to return instead
    pub error: Option<NetworkError>,
}

impl MockResponse {
    /// Create a successful JSON response
    pub fn json<T: Serialize>(data: &T) -> Self {
        Self::status(
            200,
            serde_json::to_string(data).expect("mock body serializes"),
        )
    }

    /// Create a response with the given status and raw body
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
            error: None,
        }
    }

    /// Create a Slack API error response
    pub fn slack_error(error_code: &str) -> Self {
        Self::status(200, format!(r#"{{"ok":false,"error":"{}"}}"#, error_code))
    }

    /// Create a rate limit response
    pub fn rate_limited(retry_after: u64) -> Self {
        Self::status(429, r#"{"ok":false,"error":"ratelimited"}"#)
            .with_header("retry-after", &retry_after.to_string())
    }

    /// Create a transport failure
    pub fn network_error(error: NetworkError) -> Self {
        Self {
            status: 0,
            headers: HeaderMap::new(),
            body: String::new(),
            error: Some(error),
        }
    }

    /// Add a response header
    pub fn with_header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.insert(name, value);
        }
        self
    }

    fn into_result(self) -> ExportResult<RawResponse> {
        if let Some(error) = self.error {
            return Err(ExportError::Network(error));
        }
        let status = StatusCode::from_u16(self.status)
            .map_err(|e| ExportError::Network(NetworkError::Http(e.to_string())))?;
        Ok(RawResponse::new(status, self.headers, self.body))
    }
}

/// Recorded request for verification
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request method
    pub method: String,
    /// Request URL
    pub url: String,
    /// Query parameters
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: HeaderMap,
    /// JSON body for POST requests
    pub body: Option<serde_json::Value>,
}

impl RecordedRequest {
    /// Endpoint name (last path segment of the URL)
    pub fn endpoint(&self) -> &str {
        endpoint_of(&self.url)
    }

    /// Look up a query parameter by name
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

fn endpoint_of(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// Mock HTTP transport for testing
///
/// Responses queued for a specific endpoint take precedence over the shared
/// queue.
#[derive(Default)]
pub struct MockHttpTransport {
    responses: Mutex<VecDeque<MockResponse>>,
    by_endpoint: Mutex<HashMap<String, VecDeque<MockResponse>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockHttpTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next request
    pub fn enqueue(&self, response: MockResponse) {
        self.responses.lock().push_back(response);
    }

    /// Queue a response for the next request to `endpoint`
    pub fn enqueue_for(&self, endpoint: &str, response: MockResponse) {
        self.by_endpoint
            .lock()
            .entry(endpoint.to_string())
            .or_default()
            .push_back(response);
    }

    /// All recorded requests
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Recorded requests to one endpoint
    pub fn requests_to(&self, endpoint: &str) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.endpoint() == endpoint)
            .cloned()
            .collect()
    }

    /// Number of requests received
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    fn next_response(&self, url: &str) -> ExportResult<RawResponse> {
        let endpoint = endpoint_of(url);
        let scripted = self
            .by_endpoint
            .lock()
            .get_mut(endpoint)
            .and_then(VecDeque::pop_front);

        match scripted.or_else(|| self.responses.lock().pop_front()) {
            Some(response) => response.into_result(),
            None => Err(ExportError::Network(NetworkError::Http(format!(
                "no mock response queued for {}",
                endpoint
            )))),
        }
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn get(&self, request: GetRequest) -> ExportResult<RawResponse> {
        self.requests.lock().push(RecordedRequest {
            method: "GET".to_string(),
            url: request.url.clone(),
            query: request.query.clone(),
            headers: request.headers.clone(),
            body: None,
        });
        self.next_response(&request.url)
    }

    async fn post_json(&self, request: PostRequest) -> ExportResult<RawResponse> {
        self.requests.lock().push(RecordedRequest {
            method: "POST".to_string(),
            url: request.url.clone(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: Some(request.body.clone()),
        });
        self.next_response(&request.url)
    }
}

impl std::fmt::Debug for MockHttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockHttpTransport")
            .field("requests", &self.request_count())
            .finish()
    }
}
