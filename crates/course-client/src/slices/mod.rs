//! # Store Slices
//!
//! The four server-owned resources the client keeps in its store. Each module
//! declares a [`Slice`] marker (name, empty default, trigger, request) and a
//! `new()` factory returning the running pieces for that slice.

pub mod courses;
pub mod creator_courses;
pub mod current_user;
pub mod reviews;

pub use courses::PublishedCourses;
pub use creator_courses::CreatorCourses;
pub use current_user::CurrentUser;
pub use reviews::AllReviews;

use std::sync::Arc;
use store_sync::{slice, ResourceFetcher, Slice, SliceActor, SliceReader, SyncHook};

/// Default mailbox size of every slice actor.
pub const SLICE_BUFFER: usize = 32;

/// Creates a slice actor and wires its single writer into a hook.
pub(crate) fn build<S: Slice>(
    fetcher: Arc<dyn ResourceFetcher>,
) -> (SliceActor<S>, SliceReader<S>, SyncHook<S>) {
    let (actor, reader, writer) = slice::<S>(SLICE_BUFFER);
    (actor, reader, SyncHook::new(fetcher, writer))
}
