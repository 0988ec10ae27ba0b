//! HTTP surface for the record store.
//!
//! This module wires the three operations a client uses:
//! - `POST /upload`: multipart upload of one CSV file. The `file` field is
//!   streamed to a temp artifact, validated and ingested by
//!   `crate::ingest`, and the response reports accepted and rejected row
//!   counts.
//! - `GET /posts`: paginated listing of persisted records, with an
//!   optional case-insensitive search over name, email and body.
//! - `DELETE /posts`: unconditionally clears every record.

use actix_web::web::{delete, get, post, resource, scope};
use actix_web::Scope;

mod clear;
mod list;
mod upload;

const API_PATH: &str = "";

/// Configures and returns the Actix scope for the record routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        // Route to upload and ingest a CSV file.
        .route("/upload", post().to(upload::process))
        // Listing and clearing share a path and split on the method.
        .service(
            resource("/posts")
                .route(get().to(list::process))
                .route(delete().to(clear::process)),
        )
}
