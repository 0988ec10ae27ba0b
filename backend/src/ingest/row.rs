use crate::ingest::header::ColumnMap;
use common::model::post::NewPost;
use csv::ByteRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Simplified address shape, anchored to the whole value.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// A row excluded from persistence, kept with its original cells and the
/// checks that failed.
#[derive(Debug, Clone)]
pub struct RowRejection {
    pub line: u64,
    pub cells: Vec<String>,
    pub reasons: Vec<String>,
}

/// Validate one raw row against the record shape.
///
/// `postId` and `id` must parse as integers after trimming, `name` must be
/// non-empty as-is, `email` must match the address pattern. A missing
/// `body` cell becomes the empty string and never rejects. Reasons
/// accumulate in field order, so a row failing several checks reports all
/// of them.
pub fn validate_row(
    columns: &ColumnMap,
    record: &ByteRecord,
    line: u64,
) -> Result<NewPost, RowRejection> {
    let mut reasons = Vec::new();

    let post_id = integer_cell(record, columns.post_id);
    if post_id.is_none() {
        reasons.push("postId must be an integer".to_string());
    }
    let external_id = integer_cell(record, columns.external_id);
    if external_id.is_none() {
        reasons.push("id must be an integer".to_string());
    }

    let name = text_cell(record, columns.name);
    if name.is_empty() {
        reasons.push("name must not be empty".to_string());
    }

    let email = text_cell(record, columns.email);
    if !EMAIL_RE.is_match(&email) {
        reasons.push("email must be a valid email address".to_string());
    }

    let body = text_cell(record, columns.body);

    match (post_id, external_id) {
        (Some(post_id), Some(external_id)) if reasons.is_empty() => Ok(NewPost {
            external_id,
            post_id,
            name,
            email,
            body,
        }),
        _ => Err(RowRejection {
            line,
            cells: record
                .iter()
                .map(|cell| String::from_utf8_lossy(cell).into_owned())
                .collect(),
            reasons,
        }),
    }
}

/// Cells past the end of a short row read as absent: integer checks fail
/// and text fields come back empty.
fn cell<'r>(record: &'r ByteRecord, index: usize) -> Option<Cow<'r, str>> {
    record.get(index).map(String::from_utf8_lossy)
}

fn integer_cell(record: &ByteRecord, index: usize) -> Option<i64> {
    cell(record, index).and_then(|value| value.trim().parse::<i64>().ok())
}

fn text_cell(record: &ByteRecord, index: usize) -> String {
    cell(record, index).map(Cow::into_owned).unwrap_or_default()
}
