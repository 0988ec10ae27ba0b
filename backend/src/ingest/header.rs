use crate::ingest::error::UploadError;

/// Column names every upload must carry, in reporting order.
pub const REQUIRED_COLUMNS: [&str; 5] = ["postId", "id", "name", "email", "body"];

/// Cell indexes resolved by the header gate, named for the persisted
/// fields. The renames are fixed here: `external_id` reads the source `id`
/// column and `post_id` the source `postId` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub post_id: usize,
    pub external_id: usize,
    pub name: usize,
    pub email: usize,
    pub body: usize,
}

/// Normalize one raw header cell: trim whitespace, strip one wrapping
/// quote pair, strip a leading byte-order mark.
fn normalize_cell(cell: &str) -> &str {
    let mut cell = cell.trim();
    if cell.len() >= 2 && cell.starts_with('"') && cell.ends_with('"') {
        cell = &cell[1..cell.len() - 1];
    }
    cell.strip_prefix('\u{feff}').unwrap_or(cell)
}

/// Gate the first line of an upload.
///
/// All required columns must be present after normalization; extra columns
/// are ignored and the last occurrence wins when a name repeats, as in a
/// header-to-value mapping where later columns overwrite earlier ones. On
/// failure every missing column is reported, not just the first.
pub fn resolve_columns(cells: &[String]) -> Result<ColumnMap, UploadError> {
    let normalized: Vec<&str> = cells.iter().map(|cell| normalize_cell(cell)).collect();
    let find = |name: &str| normalized.iter().rposition(|cell| *cell == name);

    let post_id = find("postId");
    let external_id = find("id");
    let name = find("name");
    let email = find("email");
    let body = find("body");

    match (post_id, external_id, name, email, body) {
        (Some(post_id), Some(external_id), Some(name), Some(email), Some(body)) => Ok(ColumnMap {
            post_id,
            external_id,
            name,
            email,
            body,
        }),
        _ => {
            let found = [post_id, external_id, name, email, body];
            let missing = REQUIRED_COLUMNS
                .iter()
                .zip(found)
                .filter(|(_, index)| index.is_none())
                .map(|(column, _)| (*column).to_string())
                .collect();
            Err(UploadError::MissingColumns(missing))
        }
    }
}
