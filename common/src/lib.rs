//! Shared wire contract for the CSV records service.
//!
//! Everything here is the JSON surface clients see, so field names follow
//! the camelCase wire convention rather than Rust's.

pub mod model;
pub mod responses;
