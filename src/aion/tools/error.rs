use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tools read, rewrite, or persist workspace files.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Raised when JSON serialization of a run report fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when a sheet the run depends on is absent from the workbook.
    #[error("missing sheet '{0}' in workbook")]
    MissingSheet(String),

    /// Raised when required ticket columns cannot be resolved against the
    /// inferred header row. Carries every missing name at once.
    #[error("missing columns in {sheet} header row {header_row}: {names:?}")]
    MissingColumns {
        sheet: String,
        header_row: u32,
        names: Vec<String>,
    },

    /// Raised when the external directory-listing process fails.
    #[error("directory listing failed: {0}")]
    Listing(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
