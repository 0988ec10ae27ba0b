use crate::db::Database;
use crate::ingest::error::UploadError;
use crate::ingest::header;
use crate::ingest::row::{self, RowRejection};
use common::model::post::NewPost;
use csv::{ByteRecord, ReaderBuilder};
use log::{debug, info, warn};
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

/// Accepted records are written in groups of this size, one create-many
/// call per group, in input order.
pub const BATCH_SIZE: usize = 1000;

/// The single store operation the pipeline performs. `Database` is the
/// production implementation; tests substitute stores that fail mid-run
/// or record the calls they receive.
pub trait BatchInsert {
    fn insert_many(&self, posts: &[NewPost]) -> rusqlite::Result<usize>;
}

impl BatchInsert for Database {
    fn insert_many(&self, posts: &[NewPost]) -> rusqlite::Result<usize> {
        Database::insert_many(self, posts)
    }
}

/// What one finished upload reports back.
#[derive(Debug)]
pub struct UploadOutcome {
    pub success_count: usize,
    /// Rejected rows in full; callers usually report only the count.
    pub rejections: Vec<RowRejection>,
}

impl UploadOutcome {
    pub fn error_count(&self) -> usize {
        self.rejections.len()
    }
}

/// Run one upload end to end: gate the header, validate every row, persist
/// accepted rows in batches, and remove the temp artifact on every exit
/// path. Blocking; callers run it on a worker thread.
pub fn run<S: BatchInsert>(
    db: &S,
    path: &Path,
    delay_ms: u64,
) -> Result<UploadOutcome, UploadError> {
    let result = ingest_file(db, path, delay_ms);
    remove_artifact(path);
    result
}

fn ingest_file<S: BatchInsert>(
    db: &S,
    path: &Path,
    delay_ms: u64,
) -> Result<UploadOutcome, UploadError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| UploadError::Stream(e.to_string()))?;

    let header_cells: Vec<String> = reader
        .byte_headers()
        .map_err(|e| UploadError::Stream(e.to_string()))?
        .iter()
        .map(|cell| String::from_utf8_lossy(cell).into_owned())
        .collect();
    let columns = header::resolve_columns(&header_cells)?;

    let mut accepted: Vec<NewPost> = Vec::new();
    let mut rejections: Vec<RowRejection> = Vec::new();
    let mut record = ByteRecord::new();
    while reader
        .read_byte_record(&mut record)
        .map_err(|e| UploadError::Stream(e.to_string()))?
    {
        let line = record.position().map_or(0, |position| position.line());
        match row::validate_row(&columns, &record, line) {
            Ok(post) => accepted.push(post),
            Err(rejection) => {
                debug!(
                    "rejected row at line {}: {}",
                    rejection.line,
                    rejection.reasons.join("; ")
                );
                rejections.push(rejection);
            }
        }
    }

    // Deliberate pause so a UI can show upload progress. Zero unless
    // configured.
    if delay_ms > 0 {
        thread::sleep(Duration::from_millis(delay_ms));
    }

    for batch in accepted.chunks(BATCH_SIZE) {
        db.insert_many(batch)?;
    }

    info!(
        "upload processed: {} rows accepted, {} rejected",
        accepted.len(),
        rejections.len()
    );
    Ok(UploadOutcome {
        success_count: accepted.len(),
        rejections,
    })
}

/// Existence-checked so a path already gone is not an error.
fn remove_artifact(path: &Path) {
    if path.exists() {
        if let Err(e) = fs::remove_file(path) {
            warn!("could not remove upload artifact {}: {}", path.display(), e);
        }
    }
}
