//! Error types for sheet ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading the input workbook.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input folder or workbook file not found.
    #[error("input not found: {path}")]
    InputNotFound { path: PathBuf },

    /// Input is a file but not an `.xlsx` workbook.
    #[error("unsupported input file (expected a folder or .xlsx workbook): {path}")]
    UnsupportedInput { path: PathBuf },

    /// Sheet export not found.
    #[error("sheet '{sheet}' not found: {path}")]
    SheetNotFound { sheet: &'static str, path: PathBuf },

    // === CSV Parsing Errors ===
    /// Failed to open or parse a CSV file.
    #[error("failed to read CSV {path}: {source}")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    // === Workbook Errors ===
    /// Failed to open or parse an `.xlsx` workbook.
    #[error("failed to read workbook {path}: {source}")]
    XlsxRead {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    /// Sheet has no header row.
    #[error("sheet is empty: {path}")]
    EmptySheet { path: PathBuf },

    // === Schema Errors ===
    /// Required column not found in a sheet.
    #[error("required column '{column}' not found in {path} (found: {found})")]
    MissingColumn {
        column: &'static str,
        path: PathBuf,
        found: String,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
