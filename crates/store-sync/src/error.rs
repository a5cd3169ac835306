//! # Store & Fetch Errors
//!
//! Common error types shared by the fetcher, the slice actors and the sync hooks.
//! Every lower-level failure is converted into one of these at the boundary of
//! the component that owns the resource.

/// Errors produced when a fetch outcome is turned into a plain `Result`.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum FetchError {
    /// The request was rejected, the server answered non-2xx, or the body
    /// could not be decoded. Carries the user-facing message.
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),
}

/// Errors that can occur while talking to a slice actor.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("Slice actor closed")]
    ActorClosed,
    #[error("Slice actor dropped response channel")]
    ActorDropped,
    #[error("Sync task failed: {0}")]
    TaskFailed(String),
}
