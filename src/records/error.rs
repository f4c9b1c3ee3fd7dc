// ABOUTME: Error types for row normalization
// ABOUTME: Each variant names the sheet row that failed so operators can fix the data

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Spreadsheet returned no rows")]
    MissingHeader,

    #[error("Row {row} has {found} columns, expected at most {expected}")]
    TooManyColumns {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("Row {row}: email '{email}' is not an address in domain '{domain}'")]
    InvalidEmail {
        row: usize,
        email: String,
        domain: String,
    },

    #[error("Row {row}: name is empty")]
    MissingName { row: usize },

    #[error("Row {row}: phone '{phone}' does not match NNN-NNN-NNNN")]
    InvalidPhone { row: usize, phone: String },
}

pub type Result<T> = std::result::Result<T, RecordError>;
