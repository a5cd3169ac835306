//! # Slice Trait
//!
//! A slice is one named region of the client-held store, holding a single
//! resource type (e.g. the published course list, or the signed-in user).
//!
//! # Architecture Note
//! Like an entity in a resource-oriented actor system, each slice is described
//! by a small marker type implementing [`Slice`]. The associated types pin down
//! what the slice stores and what gates its fetch, so the generic
//! [`SliceActor`](crate::SliceActor) and [`SyncHook`](crate::SyncHook) are
//! written once and reused for every resource.

use crate::fetch::FetchRequest;
use crate::result::ResourceResult;
use serde::de::DeserializeOwned;
use std::fmt::{Debug, Display, Formatter};

/// Contract for a store slice.
pub trait Slice: Send + Sync + 'static {
    /// What the slice holds (e.g. `Vec<Course>`, `Option<User>`).
    type Value: Clone + Debug + Send + Sync + DeserializeOwned + 'static;

    /// The input that must be present or change for the slice to re-sync.
    /// Use `()` for slices that sync once on mount.
    type Trigger: Clone + Debug + PartialEq + Send + Sync + 'static;

    /// Store key, e.g. `"courses"`.
    const NAME: &'static str;

    /// The declared empty default. Written at start-up and after every failed fetch.
    fn empty() -> Self::Value;

    /// Builds the request for a trigger, or `None` when the trigger is unmet
    /// (for example, no signed-in user). An unmet trigger means no network call.
    fn request(trigger: &Self::Trigger) -> Option<FetchRequest>;

    /// Turns the fetched payload into the slice value.
    ///
    /// Decodes the whole payload at once. List slices override this with
    /// [`ResourceResult::decode_each`] so one bad element does not cost the rest.
    fn decode(payload: ResourceResult<serde_json::Value>) -> ResourceResult<Self::Value> {
        payload.decode()
    }
}

/// Monotonically increasing stamp attached to every fetch a hook starts.
///
/// The slice actor only accepts writes stamped with its latest generation;
/// a completion from a superseded fetch is discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Display for Generation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "gen_{}", self.0)
    }
}

/// Whether a slice write took effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Applied,
    /// The write came from a superseded fetch and was dropped.
    Discarded,
}
