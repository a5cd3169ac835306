//! # Search Orchestrator
//!
//! The voice-or-text course search, run as an actor.
//!
//! ```text
//!            manual_submit / submit            fetch ok, n > 0
//!   Idle ───────────────────────────▶ Searching ───────────────▶ Results(n)
//!    │                                  ▲   │    fetch ok, n = 0
//!    │ voice_start       transcript     │   ├──────────────────▶ Empty
//!    └──────────▶ Listening ────────────┘   │    fetch failed
//!                    │ capture error / end  └──────────────────▶ Failed
//!                    └──────────────────▶ Idle
//! ```
//!
//! Every session (one submission, spoken or typed) gets a [`SessionId`].
//! Capture and fetch completions report back tagged with it, and anything
//! tagged with a superseded session is dropped. A new `submit` therefore
//! abandons the previous session without cancelling its HTTP call.

pub mod error;
pub mod handle;
pub mod message;
pub mod orchestrator;
pub mod state;

pub use error::SearchError;
pub use handle::SearchHandle;
pub use message::{SearchCommand, SessionId};
pub use orchestrator::{new, SearchOrchestrator};
pub use state::{Notice, NoticeLevel, SearchPhase, SearchView};
