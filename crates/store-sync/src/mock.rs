//! # Mock Fetchers & Testing Guide
//!
//! Two test doubles for [`ResourceFetcher`], mirroring the two ways a sync test
//! usually needs to control the network.
//!
//! | Double | Use when |
//! |--------|----------|
//! | [`MockFetcher`] | Responses are known up front. Fluent expectations, call recording, `verify()`. |
//! | [`create_mock_fetcher`] | The test must decide *when* each request completes (ordering, races). |
//!
//! ## Pattern 0: Scripted responses
//!
//! ```rust
//! use store_sync::mock::MockFetcher;
//! use store_sync::{FetchRequest, ResourceFetcher};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockFetcher::new();
//!     mock.expect_get("/api/review/allReview").return_ok(json!([]));
//!
//!     let fetcher = mock.fetcher();
//!     let result = fetcher.fetch(FetchRequest::get("/api/review/allReview")).await;
//!     assert!(result.is_success());
//!
//!     mock.verify();
//! }
//! ```
//!
//! ## Pattern 1: Gated responses
//!
//! ```rust
//! use store_sync::mock::{create_mock_fetcher, expect_fetch};
//! use store_sync::{FetchRequest, ResourceFetcher, ResourceResult};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (fetcher, mut requests) = create_mock_fetcher(4);
//!
//!     let call = tokio::spawn(async move {
//!         fetcher.fetch(FetchRequest::get("/api/course/getpublishedcoures")).await
//!     });
//!
//!     let (request, respond_to) = expect_fetch(&mut requests).await.unwrap();
//!     assert_eq!(request.path, "/api/course/getpublishedcoures");
//!     respond_to.send(ResourceResult::success(json!([]))).unwrap();
//!
//!     assert!(call.await.unwrap().is_success());
//! }
//! ```

use crate::fetch::{FetchRequest, Method, ResourceFetcher};
use crate::result::ResourceResult;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

struct Expectation {
    method: Method,
    path: String,
    response: ResourceResult<Value>,
}

/// A scripted fetcher. Each request consumes the oldest expectation for its
/// method and path, so concurrent syncs of different endpoints may arrive in
/// any order. A request with no matching expectation panics the test.
///
/// The responses are the already-unwrapped payloads a real fetcher would return.
#[derive(Clone, Default)]
pub struct MockFetcher {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    calls: Arc<Mutex<Vec<FetchRequest>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the fetcher to inject into the code under test.
    pub fn fetcher(&self) -> Arc<dyn ResourceFetcher> {
        Arc::new(self.clone())
    }

    /// Expects a `GET` on `path`.
    pub fn expect_get(&mut self, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method: Method::Get,
            path: path.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `POST` on `path`.
    pub fn expect_post(&mut self, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method: Method::Post,
            path: path.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Every request received so far, in order.
    pub fn calls(&self) -> Vec<FetchRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

#[async_trait]
impl ResourceFetcher for MockFetcher {
    async fn fetch(&self, request: FetchRequest) -> ResourceResult<Value> {
        self.calls.lock().unwrap().push(request.clone());
        let mut exps = self.expectations.lock().unwrap();
        let position = exps
            .iter()
            .position(|exp| exp.method == request.method && exp.path == request.path);
        match position.and_then(|i| exps.remove(i)) {
            Some(exp) => exp.response,
            None => panic!(
                "Unexpected request {}: {} expectations left, none for this endpoint",
                request,
                exps.len()
            ),
        }
    }
}

/// Builder for a single expectation.
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ExpectationBuilder {
    /// Responds with a successful payload.
    pub fn return_ok(self, data: Value) {
        self.push(ResourceResult::success(data));
    }

    /// Responds with a failure carrying `message`.
    pub fn return_err(self, message: impl Into<String>) {
        self.push(ResourceResult::error(message));
    }

    fn push(self, response: ResourceResult<Value>) {
        self.expectations.lock().unwrap().push_back(Expectation {
            method: self.method,
            path: self.path,
            response,
        });
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// A request waiting for the test to answer it.
#[derive(Debug)]
pub struct PendingFetch {
    pub request: FetchRequest,
    pub respond_to: oneshot::Sender<ResourceResult<Value>>,
}

/// Fetcher that forwards each request to a channel the test controls.
pub struct ChannelFetcher {
    sender: mpsc::Sender<PendingFetch>,
}

#[async_trait]
impl ResourceFetcher for ChannelFetcher {
    async fn fetch(&self, request: FetchRequest) -> ResourceResult<Value> {
        let fallback = request.fallback_message.clone();
        let (respond_to, response) = oneshot::channel();
        if self
            .sender
            .send(PendingFetch {
                request,
                respond_to,
            })
            .await
            .is_err()
        {
            return ResourceResult::error(fallback);
        }
        response
            .await
            .unwrap_or_else(|_| ResourceResult::error(fallback))
    }
}

/// Creates a gated fetcher and the receiver on which its requests arrive.
///
/// A request whose responder is dropped completes with its fallback message.
pub fn create_mock_fetcher(
    buffer_size: usize,
) -> (Arc<dyn ResourceFetcher>, mpsc::Receiver<PendingFetch>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (Arc::new(ChannelFetcher { sender }), receiver)
}

/// Waits for the next request on a gated fetcher.
pub async fn expect_fetch(
    receiver: &mut mpsc::Receiver<PendingFetch>,
) -> Option<(FetchRequest, oneshot::Sender<ResourceResult<Value>>)> {
    receiver
        .recv()
        .await
        .map(|pending| (pending.request, pending.respond_to))
}
