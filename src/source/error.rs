// ABOUTME: Error types for fetching rows from the remote spreadsheet
// ABOUTME: Covers malformed URLs, credential lookup, HTTP failures, and empty worksheets

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Invalid spreadsheet URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to obtain spreadsheet credentials: {message}")]
    CredentialError { message: String },

    #[error("Spreadsheet request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Spreadsheet request returned {status}: {body}")]
    StatusError {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to decode spreadsheet response: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("{source_name} has no rows after the header")]
    EmptySheet { source_name: String },
}

pub type Result<T> = std::result::Result<T, SourceError>;
