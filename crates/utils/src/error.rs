//! Error types for utility functions.

/// Errors that can occur during utility operations.
#[derive(Debug, thiserror::Error)]
pub enum UtilsError {
    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Missing column.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// A cell could not be interpreted.
    #[error("invalid value in column {column}, row {row}: {value}")]
    InvalidValue {
        /// Column name.
        column: String,
        /// Zero-based data row.
        row: usize,
        /// Offending cell content.
        value: String,
    },
}
