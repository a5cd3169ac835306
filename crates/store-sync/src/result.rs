//! # ResourceResult
//!
//! The normalized outcome of a single fetch. A fetcher never returns a raw
//! transport error: it always produces one of the two variants below, and a
//! result is never partially populated.

use crate::error::FetchError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Message used when neither the backend nor the request supplies one.
pub const GENERIC_FAILURE: &str = "Request failed";

/// Message used when a 2xx body cannot be parsed or decoded.
pub const MALFORMED_RESPONSE: &str = "Malformed response";

/// Tagged union produced by a [`ResourceFetcher`](crate::ResourceFetcher).
///
/// Serializes as `{"state":"success","data":…}` or `{"state":"error","message":…}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ResourceResult<T> {
    Success { data: T },
    Error { message: String },
}

impl<T> ResourceResult<T> {
    pub fn success(data: T) -> Self {
        Self::Success { data }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The failure message, if this is an error result.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Error { message } => Some(message),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResourceResult<U> {
        match self {
            Self::Success { data } => ResourceResult::Success { data: f(data) },
            Self::Error { message } => ResourceResult::Error { message },
        }
    }

    /// Returns the payload, or `empty` on failure. This is the slice-write rule:
    /// an error never leaves stale data behind.
    pub fn or_empty(self, empty: T) -> T {
        match self {
            Self::Success { data } => data,
            Self::Error { .. } => empty,
        }
    }

    pub fn into_result(self) -> Result<T, FetchError> {
        match self {
            Self::Success { data } => Ok(data),
            Self::Error { message } => Err(FetchError::NetworkFailure(message)),
        }
    }
}

impl ResourceResult<serde_json::Value> {
    /// Decodes an untyped payload into `T`.
    ///
    /// A payload that does not match `T` becomes an error result carrying
    /// [`MALFORMED_RESPONSE`]; error results pass through unchanged.
    pub fn decode<T: DeserializeOwned>(self) -> ResourceResult<T> {
        match self {
            Self::Success { data } => match serde_json::from_value(data) {
                Ok(decoded) => ResourceResult::Success { data: decoded },
                Err(e) => {
                    warn!(error = %e, target_type = std::any::type_name::<T>(), "Decode failed");
                    ResourceResult::error(MALFORMED_RESPONSE)
                }
            },
            Self::Error { message } => ResourceResult::Error { message },
        }
    }

    /// Decodes an array payload element by element.
    ///
    /// Elements that do not match `T` are dropped and logged; the rest are
    /// kept in order. A payload that is not an array becomes
    /// [`MALFORMED_RESPONSE`].
    pub fn decode_each<T: DeserializeOwned>(self) -> ResourceResult<Vec<T>> {
        let items = match self {
            Self::Success {
                data: serde_json::Value::Array(items),
            } => items,
            Self::Success { data } => {
                warn!(kind = json_kind(&data), "Expected a list payload");
                return ResourceResult::error(MALFORMED_RESPONSE);
            }
            Self::Error { message } => return ResourceResult::Error { message },
        };

        let total = items.len();
        let mut decoded = Vec::with_capacity(total);
        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value(item) {
                Ok(value) => decoded.push(value),
                Err(e) => warn!(
                    index,
                    error = %e,
                    target_type = std::any::type_name::<T>(),
                    "Dropped undecodable element"
                ),
            }
        }
        if decoded.len() < total {
            warn!(kept = decoded.len(), total, "Partially decoded list");
        }
        ResourceResult::Success { data: decoded }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
