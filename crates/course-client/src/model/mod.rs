//! Server-defined records. Only the fields the client renders or navigates with
//! are typed; everything else is carried through untouched in `extra`.

pub mod auth;
pub mod course;
pub mod review;
pub mod user;

pub use auth::*;
pub use course::*;
pub use review::*;
pub use user::*;

use thiserror::Error;

/// A record carried neither `_id` nor `id`.
#[derive(Debug, Error)]
#[error("record has neither `_id` nor `id`")]
pub struct MissingId;

/// Prefers the Mongo `_id`; documents serialized with virtuals carry both.
fn pick_id<I>(mongo_id: Option<I>, id: Option<I>) -> Result<I, MissingId> {
    mongo_id.or(id).ok_or(MissingId)
}
