// ABOUTME: Result type recorded for each admin tool invocation
// ABOUTME: Captures exit code, output streams, and timing for logging and run summaries

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum PushStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct PushResult {
    pub email: String,
    pub status: PushStatus,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration: Duration,
}

impl PushResult {
    /// Build a result from a finished process
    pub fn from_output(
        email: String,
        output: &std::process::Output,
        start_time: DateTime<Utc>,
    ) -> Self {
        let end_time = Utc::now();
        let exit_code = output.status.code().unwrap_or(-1);
        let status = if output.status.success() {
            PushStatus::Success
        } else {
            PushStatus::Failed
        };

        Self {
            email,
            status,
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            start_time,
            end_time,
            duration: (end_time - start_time).to_std().unwrap_or_default(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == PushStatus::Success
    }
}
