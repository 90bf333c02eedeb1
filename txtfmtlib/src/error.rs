//! Error types for txtfmtlib

use thiserror::Error;

/// Errors that can occur while formatting values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TxtFmtError {
    /// An argument has the wrong cardinality or an inconsistent value
    #[error("invalid '{argument}': expected {expected}, got {actual}")]
    Configuration {
        argument: &'static str,
        expected: String,
        actual: String,
    },

    /// Row exclusion left nothing to round
    #[error("no rows left to round after applying the row exclusion")]
    NoRows,

    /// Column exclusion left nothing to round
    #[error("no columns left to round after applying the column exclusion")]
    NoColumns,

    /// Invalid name pattern
    #[error("invalid name pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Character that cannot act as a decimal separator
    #[error("invalid decimal marker '{0}': digits, '-' and whitespace are not allowed")]
    InvalidDecimalMarker(char),

    /// Table rows of differing lengths
    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedTable {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Row or column names that don't match the table shape
    #[error("{axis} names have length {actual}, expected {expected}")]
    NamesLength {
        axis: &'static str,
        expected: usize,
        actual: usize,
    },

    /// P-value outside the unit interval
    #[error("p-value {0} is outside [0, 1]")]
    InvalidPvalue(f64),

    /// Nothing to merge
    #[error("at least one line is required")]
    NoLines,
}

impl TxtFmtError {
    /// Build a cardinality error for a digit specification.
    pub(crate) fn digits_length(argument: &'static str, targets: usize, actual: usize) -> Self {
        TxtFmtError::Configuration {
            argument,
            expected: if targets == 1 {
                "1 value".to_string()
            } else {
                format!("1 or {} values", targets)
            },
            actual: format!("{} values", actual),
        }
    }
}
