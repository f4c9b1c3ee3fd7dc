// ABOUTME: Error types for pushing signatures with the external admin tool
// ABOUTME: A failed invocation aborts the remaining pushes, so each variant is terminal

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PushError {
    #[error("Admin tool not found: {}", .tool.display())]
    ToolNotFound { tool: PathBuf },

    #[error("Failed to read signature directory {}: {source}", .path.display())]
    DirectoryError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to run {} for {email}: {source}", .tool.display())]
    SpawnError {
        tool: PathBuf,
        email: String,
        source: std::io::Error,
    },

    #[error("Admin tool exited with code {exit_code} while pushing {email}: {stderr}")]
    ToolFailed {
        email: String,
        exit_code: i32,
        stderr: String,
    },
}

pub type Result<T> = std::result::Result<T, PushError>;
