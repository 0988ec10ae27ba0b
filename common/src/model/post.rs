use serde::{Deserialize, Serialize};

/// A persisted record, one per accepted CSV row.
///
/// `id` is assigned by the store and stays unique for the lifetime of the
/// database, even across a full clear. `external_id` carries the source
/// `id` column and `post_id` the source `postId` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub external_id: i64,
    pub post_id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// The insert shape handed to the store, before an internal id exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub external_id: i64,
    pub post_id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
}
