use crate::model::Course;
use serde_json::Value;
use std::sync::Arc;
use store_sync::{
    FetchRequest, ResourceFetcher, ResourceResult, Slice, SliceActor, SliceReader, SyncHook,
};

/// Every published course, loaded once on mount.
#[derive(Debug)]
pub struct PublishedCourses;

impl Slice for PublishedCourses {
    type Value = Vec<Course>;
    type Trigger = ();
    const NAME: &'static str = "courses";

    fn empty() -> Vec<Course> {
        Vec::new()
    }

    fn request(_: &()) -> Option<FetchRequest> {
        Some(FetchRequest::get("/api/course/getpublishedcoures"))
    }

    fn decode(payload: ResourceResult<Value>) -> ResourceResult<Vec<Course>> {
        payload.decode_each()
    }
}

pub fn new(
    fetcher: Arc<dyn ResourceFetcher>,
) -> (
    SliceActor<PublishedCourses>,
    SliceReader<PublishedCourses>,
    SyncHook<PublishedCourses>,
) {
    super::build(fetcher)
}
