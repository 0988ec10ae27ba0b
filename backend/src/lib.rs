//! CSV records service: upload a CSV file, validate and persist its rows,
//! then list, search and clear the stored records over HTTP.

pub mod config;
pub mod db;
pub mod ingest;
pub mod services;
