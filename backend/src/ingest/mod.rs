//! CSV ingestion pipeline.
//!
//! One upload flows through three stages:
//! - `header`: the one-time gate over the first line's column names,
//!   yielding the cell indexes the row validator reads from.
//! - `row`: per-row validation turning raw cells into insertable records
//!   or retained rejections.
//! - `pipeline`: a single pass that drives both stages over the uploaded
//!   file and persists accepted records in fixed-size batches.
//!
//! Terminal failures live in the `error::UploadError` taxonomy. Row-level
//! rejections are not failures; they are counted and never abort a pass.

pub mod error;
pub mod header;
pub mod pipeline;
pub mod row;
