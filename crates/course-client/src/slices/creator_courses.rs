use crate::model::{Course, UserId};
use serde_json::Value;
use std::sync::Arc;
use store_sync::{
    FetchRequest, ResourceFetcher, ResourceResult, Slice, SliceActor, SliceReader, SyncHook,
};

/// Courses authored by the signed-in educator.
///
/// Triggered by the signed-in user's id: no user, no request. The backend
/// identifies the creator from the session cookie, so the id only gates and
/// re-keys the fetch.
#[derive(Debug)]
pub struct CreatorCourses;

impl Slice for CreatorCourses {
    type Value = Vec<Course>;
    type Trigger = Option<UserId>;
    const NAME: &'static str = "creatorCourses";

    fn empty() -> Vec<Course> {
        Vec::new()
    }

    fn request(user: &Option<UserId>) -> Option<FetchRequest> {
        user.as_ref()
            .map(|_| FetchRequest::get("/api/course/getcreatorcourses"))
    }

    fn decode(payload: ResourceResult<Value>) -> ResourceResult<Vec<Course>> {
        payload.decode_each()
    }
}

pub fn new(
    fetcher: Arc<dyn ResourceFetcher>,
) -> (
    SliceActor<CreatorCourses>,
    SliceReader<CreatorCourses>,
    SyncHook<CreatorCourses>,
) {
    super::build(fetcher)
}
