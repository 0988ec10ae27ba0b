//! JSON bodies returned by the HTTP surface.

use crate::model::post::Post;
use serde::{Deserialize, Serialize};

/// Body of a successful upload: how many rows were persisted and how many
/// were rejected by validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub success_count: usize,
    pub error_count: usize,
}

/// One page of records plus the totals pagination controls need.
///
/// `pages` is the page count under the fixed page size; an empty result
/// set has zero pages while `page` still echoes the requested number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsPage {
    pub data: Vec<Post>,
    pub total: u64,
    pub page: u64,
    pub pages: u64,
}
