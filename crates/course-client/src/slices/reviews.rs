use crate::model::Review;
use serde_json::Value;
use std::sync::Arc;
use store_sync::{
    FetchRequest, ResourceFetcher, ResourceResult, Slice, SliceActor, SliceReader, SyncHook,
};

/// All reviews across courses.
#[derive(Debug)]
pub struct AllReviews;

impl Slice for AllReviews {
    type Value = Vec<Review>;
    type Trigger = ();
    const NAME: &'static str = "reviews";

    fn empty() -> Vec<Review> {
        Vec::new()
    }

    fn request(_: &()) -> Option<FetchRequest> {
        Some(FetchRequest::get("/api/review/allReview"))
    }

    fn decode(payload: ResourceResult<Value>) -> ResourceResult<Vec<Review>> {
        payload.decode_each()
    }
}

pub fn new(
    fetcher: Arc<dyn ResourceFetcher>,
) -> (
    SliceActor<AllReviews>,
    SliceReader<AllReviews>,
    SyncHook<AllReviews>,
) {
    super::build(fetcher)
}
