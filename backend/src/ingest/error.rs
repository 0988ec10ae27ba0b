use thiserror::Error;

/// Terminal failure of one upload.
///
/// Rejected rows are not in this taxonomy: they are retained in the
/// outcome, counted, and never stop a pass.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The request carried no usable `file` payload.
    #[error("No file uploaded")]
    NoFile,
    /// The header gate failed; every missing column name is listed.
    #[error("Invalid CSV. Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    /// A batch write failed. Batches committed before it stay committed.
    #[error("Database error")]
    Database(#[from] rusqlite::Error),
    /// The upload stream or the temp artifact could not be read.
    #[error("{0}")]
    Stream(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_message_lists_every_name() {
        let err = UploadError::MissingColumns(vec!["email".to_string(), "body".to_string()]);
        assert_eq!(err.to_string(), "Invalid CSV. Missing columns: email, body");
    }
}
