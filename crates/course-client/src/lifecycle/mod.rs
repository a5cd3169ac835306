//! # System Lifecycle
//!
//! Wiring, mounting and shutting down the client.
//!
//! [`CourseSystem`] is the conductor: it creates every slice actor and the
//! search actor, hands each slice's only writer to its hook, and exposes the
//! read side as a [`CourseStore`](crate::store::CourseStore).
//!
//! ## Mount
//!
//! | Slice | Trigger |
//! |-------|---------|
//! | `courses` | none, fetched once |
//! | `reviews` | none, fetched once |
//! | `currentUser` | none, fetched once and again after every sign-in |
//! | `creatorCourses` | the signed-in user's id, followed by a watcher task |
//!
//! ## Graceful Shutdown
//!
//! 1. Stop the creator watcher, releasing the creator hook
//! 2. Drop hooks, readers and the search handle, closing every actor's mailbox
//! 3. Await each actor task
//!
//! Readers or search handles cloned out of the system keep their actors alive;
//! drop them before calling [`CourseSystem::shutdown`].

pub mod course_system;
pub mod tracing;

pub use self::course_system::{CourseSystem, SystemError};
pub use self::tracing::{setup_tracing, setup_tracing_with_default};
