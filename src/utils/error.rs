//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Unparseable distances and times are not errors at all: they are absorbed
//! into the data (see `report::schema::ParseWarnings`).

use thiserror::Error;

/// The source workbook does not honour the input contract
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("The file must contain a sheet named '{0}'")]
    MissingSheet(String),

    #[error("File has fewer than {required} columns (found {found})")]
    TooFewColumns { found: usize, required: usize },

    #[error("Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Errors that can occur while loading the input workbook
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read workbook: {0}")]
    ReadFailed(#[from] calamine::XlsxError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid workbook: {0}")]
    InvalidFormat(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to render workbook: {0}")]
    RenderFailed(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Top-level failure of a report build.
///
/// `Schema` is the contract violation class. `Input` and `Output` cover
/// everything unexpected. Either way nothing is written.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

impl ReportError {
    pub fn is_schema(&self) -> bool {
        matches!(self, ReportError::Schema(_))
    }
}
