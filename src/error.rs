//! Error types for dataset loading and settings persistence.

use thiserror::Error;

/// Failures that abort loading a dataset.
///
/// A load either produces a complete [`Dataset`](crate::data::dataset::Dataset)
/// or one of these; no partially classified state is ever handed to the renderer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset contains no rows")]
    EmptyDataset,
    #[error("dataset has no time column")]
    MissingTimeColumn,
    #[error("time column `{column}` is not parseable as time at row {row}: `{value}`")]
    InvalidTimeColumn {
        column: String,
        row: usize,
        value: String,
    },
    #[error("column `{column}` has {found} values, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to read workbook: {0}")]
    Excel(#[from] calamine::Error),
    #[error("workbook has no worksheet")]
    MissingWorksheet,
}

/// Failures while reading or writing the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
