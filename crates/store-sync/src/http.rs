//! # HTTP Fetcher
//!
//! [`ResourceFetcher`] backed by `reqwest`.

use crate::error::FetchError;
use crate::fetch::{unwrap_envelope, FetchRequest, Method, ResourceFetcher};
use crate::result::{ResourceResult, MALFORMED_RESPONSE};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Fetches resources from the course backend.
///
/// Two clients are kept: one with a cookie store, used for credentialed
/// requests, and a plain one for requests built with
/// [`FetchRequest::without_credentials`]. Both are cheap to clone.
#[derive(Clone)]
pub struct HttpFetcher {
    base_url: String,
    credentialed: reqwest::Client,
    anonymous: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher rooted at `base_url` with a per-request `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let credentialed = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::ClientSetup(e.to_string()))?;
        let anonymous = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::ClientSetup(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentialed,
            anonymous,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Parses a response body. An empty body is `null`; invalid JSON is `None`.
fn parse_body(bytes: &[u8]) -> Option<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Some(Value::Null);
    }
    serde_json::from_slice(bytes).ok()
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    #[instrument(skip(self, request), fields(request = %request))]
    async fn fetch(&self, request: FetchRequest) -> ResourceResult<Value> {
        let client = if request.with_credentials {
            &self.credentialed
        } else {
            &self.anonymous
        };
        let url = self.url(&request.path);
        let mut builder = match request.method {
            Method::Get => client.get(&url),
            Method::Post => client.post(&url),
        };
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Request failed to send");
                return ResourceResult::error(request.fallback_message);
            }
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(status = status.as_u16(), error = %e, "Failed to read body");
                return ResourceResult::error(request.fallback_message);
            }
        };
        let body = parse_body(&bytes);

        if status.is_success() {
            match body {
                Some(body) => {
                    debug!(status = status.as_u16(), "Fetched");
                    ResourceResult::success(unwrap_envelope(body))
                }
                None => {
                    warn!(status = status.as_u16(), "Response body is not JSON");
                    ResourceResult::error(MALFORMED_RESPONSE)
                }
            }
        } else {
            let message = body
                .as_ref()
                .and_then(|b| b.get("message"))
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or(request.fallback_message);
            warn!(status = status.as_u16(), %message, "Request rejected");
            ResourceResult::error(message)
        }
    }
}
