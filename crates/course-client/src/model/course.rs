use super::{pick_id, MissingId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

/// Backend identifier of a course.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub String);

impl Display for CourseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A course as returned by the backend. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CourseRecord")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: CourseId,
    pub title: String,
    pub category: String,
    /// Remaining server fields (price, thumbnail, lectures, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wire shape: either id key, or both.
#[derive(Deserialize)]
struct CourseRecord {
    #[serde(rename = "_id", default)]
    mongo_id: Option<CourseId>,
    #[serde(default)]
    id: Option<CourseId>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    category: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<CourseRecord> for Course {
    type Error = MissingId;

    fn try_from(record: CourseRecord) -> Result<Self, MissingId> {
        Ok(Self {
            id: pick_id(record.mongo_id, record.id)?,
            title: record.title,
            category: record.category,
            extra: record.extra,
        })
    }
}
