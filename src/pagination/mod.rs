//! Cursor pagination for the Slack Web API.
//!
//! The paginator follows `response_metadata.next_cursor` until the server
//! stops returning one, concatenating every page's records in arrival order.

use crate::auth::AuthManager;
use crate::errors::{ExportError, ExportResult, ResponseError};
use crate::resilience::RateLimitGovernor;
use crate::types::{Cursor, Record, ResponseMetadata};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

/// A request that can be driven page by page
pub trait PagedRequest: Serialize + Send + Sync {
    /// API method name, e.g. `conversations.list`
    const ENDPOINT: &'static str;

    /// Field of each page holding the record list; `None` for flat bodies
    const RESULT_KEY: Option<&'static str>;
}

/// One API response
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Records carried by this page
    pub records: Vec<Record>,
    /// Continuation cursor
    pub next_cursor: Option<Cursor>,
}

impl Page {
    /// Split a response body into records and continuation cursor
    pub fn from_body(endpoint: &str, body: Value, result_key: Option<&str>) -> ExportResult<Self> {
        let next_cursor = extract_next_cursor(&body);

        let records = match result_key {
            Some(key) => {
                let malformed = || ExportError::MalformedPage {
                    endpoint: endpoint.to_string(),
                    key: key.to_string(),
                };
                let mut body = body;
                match body.get_mut(key).map(Value::take) {
                    Some(Value::Array(items)) => records_from(endpoint, key, items)?,
                    _ => return Err(malformed()),
                }
            }
            None => match body {
                Value::Array(items) => records_from(endpoint, "", items)?,
                other => vec![Record::from_value(other).ok_or_else(|| {
                    ExportError::Response(ResponseError::DeserializationError {
                        message: format!("{} returned a non-object body", endpoint),
                    })
                })?],
            },
        };

        Ok(Self {
            records,
            next_cursor,
        })
    }

    /// Check if there are more pages
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

fn records_from(endpoint: &str, key: &str, items: Vec<Value>) -> ExportResult<Vec<Record>> {
    items
        .into_iter()
        .map(|item| {
            Record::from_value(item).ok_or_else(|| ExportError::MalformedPage {
                endpoint: endpoint.to_string(),
                key: key.to_string(),
            })
        })
        .collect()
}

/// Read `response_metadata.next_cursor`, treating missing or blank values as absent
pub fn extract_next_cursor(body: &Value) -> Option<Cursor> {
    let metadata = body.get("response_metadata")?;
    match metadata.get("next_cursor")? {
        Value::String(_) => serde_json::from_value::<ResponseMetadata>(metadata.clone())
            .ok()
            .and_then(|m| m.cursor()),
        Value::Null => None,
        other => Cursor::parse(&other.to_string()),
    }
}

/// Flatten a serializable request into query pairs, skipping nulls
pub fn to_query_pairs<T: Serialize>(request: &T) -> ExportResult<Vec<(String, String)>> {
    let value = serde_json::to_value(request).map_err(ResponseError::from)?;

    let fields = match value {
        Value::Object(fields) => fields,
        _ => return Ok(Vec::new()),
    };

    Ok(fields
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key, s)),
            other => Some((key, other.to_string())),
        })
        .collect())
}

/// Drives a paged endpoint to completion
#[derive(Debug, Clone)]
pub struct Paginator {
    governor: RateLimitGovernor,
    auth: AuthManager,
    base_url: String,
}

impl Paginator {
    /// Create a new paginator
    pub fn new(
        governor: RateLimitGovernor,
        auth: AuthManager,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            governor,
            auth,
            base_url: base_url.into(),
        }
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint)
    }

    /// Fetch every page of a typed request
    pub async fn collect<R: PagedRequest>(&self, request: &R) -> ExportResult<Vec<Record>> {
        let params = to_query_pairs(request)?;
        self.fetch_all(R::ENDPOINT, params, R::RESULT_KEY).await
    }

    /// Fetch every page of `endpoint`
    ///
    /// `params` are sent with every page; `cursor` is appended once the server
    /// hands one out. Never returns a partial result: any failure aborts.
    #[instrument(skip(self, params))]
    pub async fn fetch_all(
        &self,
        endpoint: &str,
        params: Vec<(String, String)>,
        result_key: Option<&str>,
    ) -> ExportResult<Vec<Record>> {
        let url = self.build_url(endpoint);
        let headers = self.auth.get_headers()?;

        let mut cursor: Option<Cursor> = None;
        let mut result = Vec::new();
        let mut pages = 0usize;

        loop {
            let mut request = crate::transport::GetRequest::new(url.clone(), headers.clone())
                .params(params.iter().cloned());
            if let Some(cursor) = &cursor {
                request = request.param("cursor", cursor.as_str());
            }

            let body = self.governor.get_json(endpoint, request).await?;
            let page = Page::from_body(endpoint, body, result_key)?;
            pages += 1;

            debug!(
                endpoint,
                page = pages,
                records = page.records.len(),
                has_more = page.has_more(),
                "Fetched page"
            );

            self.governor.metrics().record_page(page.records.len());
            result.extend(page.records);

            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(result)
    }
}
