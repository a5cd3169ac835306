use crate::model::User;
use std::sync::Arc;
use store_sync::{FetchRequest, ResourceFetcher, Slice, SliceActor, SliceReader, SyncHook};

/// The signed-in user. `None` when signed out or when the lookup fails.
#[derive(Debug)]
pub struct CurrentUser;

impl Slice for CurrentUser {
    type Value = Option<User>;
    type Trigger = ();
    const NAME: &'static str = "currentUser";

    fn empty() -> Option<User> {
        None
    }

    fn request(_: &()) -> Option<FetchRequest> {
        Some(FetchRequest::get("/api/user/currentuser"))
    }
}

pub fn new(
    fetcher: Arc<dyn ResourceFetcher>,
) -> (
    SliceActor<CurrentUser>,
    SliceReader<CurrentUser>,
    SyncHook<CurrentUser>,
) {
    super::build(fetcher)
}
