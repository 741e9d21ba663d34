use std::path::PathBuf;

/// A date string that could not be read as `YYYY-MM-DD`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid date in `{field}`: {value:?} (expected YYYY-MM-DD)")]
pub struct DateParseError {
    pub field: String,
    pub value: String,
}

impl DateParseError {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown view mode {0:?} (expected daily, weekly, monthly or full)")]
pub struct ParseViewModeError(pub String);

/// Failures while reading or writing snapshot and CSV files.
#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error("reading {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("writing {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV is missing required columns; found {found:?}, need a title column")]
    MissingColumns { found: Vec<String> },
    #[error("CSV file has no data rows")]
    Empty,
}
