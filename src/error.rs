//! Typed errors for the table -> payload pipeline.

use thiserror::Error;

/// Every failure the shaping pipeline can report. All of them are local and
/// synchronous; nothing here is worth retrying.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("column '{column}' not found in table")]
    ColumnNotFound { column: String },

    #[error("{operation} requires at least one row")]
    EmptyInput { operation: &'static str },

    #[error("warm-up trim must be non-negative (got {trim})")]
    InvalidTrim { trim: i64 },

    #[error("column '{column}' has {found} rows, table has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("column '{column}' already exists")]
    DuplicateColumn { column: String },

    #[error("column '{column}' is not a {expected} column")]
    ColumnType {
        column: String,
        expected: &'static str,
    },

    #[error("{kind} series received the wrong point shape")]
    SeriesDataMismatch { kind: String },

    #[error("pane must be a non-negative integer (got {value})")]
    InvalidPane { value: String },

    #[error("pane indices must be contiguous from 0 (found {panes:?})")]
    NonContiguousPanes { panes: Vec<usize> },

    #[error("row {row}: unrecognised time value '{value}'")]
    MalformedTime { row: usize, value: String },

    #[error("{indicator} length must be at least 1 (got {length})")]
    InvalidLength {
        indicator: &'static str,
        length: usize,
    },
}

pub type ChartResult<T> = Result<T, ChartError>;
