use super::{pick_id, MissingId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account role chosen at sign-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Educator,
    #[serde(other)]
    Other,
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UserRecord")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct UserRecord {
    #[serde(rename = "_id", default)]
    mongo_id: Option<UserId>,
    #[serde(default)]
    id: Option<UserId>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    role: Role,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<UserRecord> for User {
    type Error = MissingId;

    fn try_from(record: UserRecord) -> Result<Self, MissingId> {
        Ok(Self {
            id: pick_id(record.mongo_id, record.id)?,
            name: record.name,
            email: record.email,
            role: record.role,
            extra: record.extra,
        })
    }
}
