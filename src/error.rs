use std::path::PathBuf;

/// Errors raised by both conversion pipelines.
///
/// Every variant aborts the whole run; nothing is written when one is returned.
#[derive(Debug, thiserror::Error)]
pub enum PctsError {
    #[error("column `{column}` not found in {input}")]
    MissingColumn { column: String, input: String },

    #[error("village `{village}` of subcentre `{group}` has no shape")]
    UnknownVillage { village: String, group: String },

    #[error("malformed input {}: {reason}", .path.display())]
    MalformedInput { path: PathBuf, reason: String },

    #[error("invalid geometry for village `{village}`: {reason}")]
    InvalidGeometry { village: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PctsError>;

impl PctsError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        PctsError::MalformedInput {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// I/O failures stay I/O errors; anything else the CSV reader rejects is
    /// reported as malformed input for `path`.
    pub(crate) fn from_csv(path: impl Into<PathBuf>, err: csv::Error) -> Self {
        if err.is_io_error() {
            PctsError::Csv(err)
        } else {
            PctsError::malformed(path, err.to_string())
        }
    }
}
