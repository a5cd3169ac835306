//! # Resource Fetcher
//!
//! The leaf of the sync pipeline: issue one request, normalize the outcome.
//!
//! [`ResourceFetcher`] is the seam between the store and the network. The
//! production implementation is [`HttpFetcher`](crate::HttpFetcher); tests use
//! the fetchers in [`mock`](crate::mock).
//!
//! ## Envelope
//!
//! The canonical response envelope is `{ "data": T }`. Some endpoints answer
//! with the bare payload instead, so [`unwrap_envelope`] accepts both. The
//! bare form is a compatibility shim, not part of the contract.

use crate::result::{ResourceResult, GENERIC_FAILURE};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// HTTP verbs used by the backend contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// Description of a single backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub method: Method,
    /// Path relative to the configured server URL, e.g. `/api/course/getpublishedcoures`.
    pub path: String,
    pub body: Option<Value>,
    /// Send site credentials (session cookie). On by default: the backend is
    /// cookie-authenticated.
    pub with_credentials: bool,
    /// Message reported when the backend does not provide one.
    pub fallback_message: String,
}

impl FetchRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
            with_credentials: true,
            fallback_message: GENERIC_FAILURE.to_string(),
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
            with_credentials: true,
            fallback_message: GENERIC_FAILURE.to_string(),
        }
    }

    pub fn without_credentials(mut self) -> Self {
        self.with_credentials = false;
        self
    }

    pub fn fallback_message(mut self, message: impl Into<String>) -> Self {
        self.fallback_message = message.into();
        self
    }
}

impl Display for FetchRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Issues one request and converts every outcome into a [`ResourceResult`].
///
/// Implementations must never panic or return early with a transport error:
/// failures are values. There are no retries; the caller decides whether to
/// run the request again.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Performs the request and returns the unwrapped payload.
    async fn fetch(&self, request: FetchRequest) -> ResourceResult<Value>;
}

/// Returns the `data` member of an enveloped body, or the body itself.
pub fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) => data,
            None => Value::Object(map),
        },
        other => other,
    }
}
