use serde::{Deserialize, Serialize};
use mongodb::bson::oid::ObjectId;

/// A document in the albums collection.
///
/// `albumId` is a human-assigned business key. Nothing enforces uniqueness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub content: String,
    #[serde(rename = "albumId")]
    pub album_id: i64,
}

impl Album {
    pub fn new(name: impl Into<String>, content: impl Into<String>, album_id: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            content: content.into(),
            album_id,
        }
    }
}
