//! # Store Sync
//!
//! Building blocks for keeping a client-held store in step with server-owned
//! resources.
//!
//! ## Architecture Overview
//!
//! The crate separates the concern into three layers:
//!
//! 1. **Fetch Layer** ([`ResourceFetcher`], [`HttpFetcher`]) - one request, one normalized [`ResourceResult`]
//! 2. **Store Layer** ([`SliceActor`], [`SliceReader`], [`SliceWriter`]) - one actor task per slice
//! 3. **Sync Layer** ([`SyncHook`]) - trigger evaluation and the fetch-then-write cycle
//!
//! A resource is described once by implementing [`Slice`]; the actor, handles
//! and hook are generic over it.
//!
//! ```rust
//! use serde_json::json;
//! use store_sync::mock::MockFetcher;
//! use store_sync::{slice, FetchRequest, Slice, SyncHook};
//!
//! #[derive(Debug)]
//! struct Reviews;
//!
//! impl Slice for Reviews {
//!     type Value = Vec<serde_json::Value>;
//!     type Trigger = ();
//!     const NAME: &'static str = "reviews";
//!     fn empty() -> Self::Value { Vec::new() }
//!     fn request(_: &()) -> Option<FetchRequest> {
//!         Some(FetchRequest::get("/api/review/allReview"))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockFetcher::new();
//!     mock.expect_get("/api/review/allReview").return_ok(json!([{"rating": 5}]));
//!
//!     // 1. Create the slice and hand its writer to the hook
//!     let (actor, reader, writer) = slice::<Reviews>(16);
//!     tokio::spawn(actor.run());
//!     let mut hook = SyncHook::new(mock.fetcher(), writer);
//!
//!     // 2. Activate on mount
//!     let task = hook.activate(()).await.unwrap().into_task().unwrap();
//!     task.finished().await.unwrap();
//!
//!     // 3. Views read the slice
//!     assert_eq!(reader.get().await.unwrap().len(), 1);
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each slice actor runs in its own Tokio task and processes requests sequentially.
//! - Each hook owns the only writer of its slice; no two hooks write the same slice.
//! - Fetches run in spawned tasks. Completions of superseded fetches are
//!   discarded by generation, not cancelled.
//!
//! ## Testing
//!
//! See the [`mock`] module for scripted and gated fetchers.

pub mod actor;
pub mod client;
pub mod error;
pub mod fetch;
pub mod hook;
pub mod http;
pub mod message;
pub mod mock;
pub mod result;
pub mod slice;

// Re-export core types for convenience
pub use actor::{slice, SliceActor};
pub use client::{SliceReader, SliceWriter};
pub use error::{FetchError, StoreError};
pub use fetch::{unwrap_envelope, FetchRequest, Method, ResourceFetcher};
pub use hook::{SyncHook, SyncStatus, SyncTask};
pub use http::HttpFetcher;
pub use message::{Response, SliceRequest};
pub use result::{ResourceResult, GENERIC_FAILURE, MALFORMED_RESPONSE};
pub use slice::{Generation, Slice, WriteOutcome};
