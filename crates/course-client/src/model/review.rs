use super::{pick_id, MissingId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(pub String);

/// A course review, listed on the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ReviewRecord")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: ReviewId,
    pub rating: Option<f64>,
    pub comment: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct ReviewRecord {
    #[serde(rename = "_id", default)]
    mongo_id: Option<ReviewId>,
    #[serde(default)]
    id: Option<ReviewId>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    comment: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<ReviewRecord> for Review {
    type Error = MissingId;

    fn try_from(record: ReviewRecord) -> Result<Self, MissingId> {
        Ok(Self {
            id: pick_id(record.mongo_id, record.id)?,
            rating: record.rating,
            comment: record.comment,
            extra: record.extra,
        })
    }
}
