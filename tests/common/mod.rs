// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides an in-memory row source, a fake admin tool, and scratch directories

#![allow(dead_code)]

use async_trait::async_trait;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

use sigsync::records::RawRow;
use sigsync::source::{Result as SourceResult, RowSource, SourceError};

pub const HEADER: [&str; 5] = ["Email", "Name", "Title", "Phone", "Pronouns"];

/// Row source that serves fixed rows and counts how often it is read
pub struct StaticRowSource {
    rows: Vec<RawRow>,
    fail: bool,
    fetches: AtomicUsize,
}

impl StaticRowSource {
    pub fn new(rows: Vec<Vec<&str>>) -> Self {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(str::to_string).collect())
                .collect(),
            fail: false,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Header followed by the given data rows
    pub fn with_users(users: Vec<Vec<&str>>) -> Self {
        let mut rows = vec![HEADER.to_vec()];
        rows.extend(users);
        Self::new(rows)
    }

    /// A source whose remote call always fails
    pub fn failing() -> Self {
        Self {
            rows: Vec::new(),
            fail: true,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RowSource for StaticRowSource {
    async fn fetch_rows(&self) -> SourceResult<Vec<RawRow>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SourceError::CredentialError {
                message: "remote unavailable".to_string(),
            });
        }
        Ok(self.rows.clone())
    }

    fn describe(&self) -> String {
        "static test rows".to_string()
    }
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Directory for rendered signatures, created on demand
    pub fn output_dir(&self) -> PathBuf {
        let dir = self.path().join("signatures");
        std::fs::create_dir_all(&dir).expect("Failed to create output directory");
        dir
    }

    pub fn write_template(&self, content: &str) -> PathBuf {
        let path = self.path().join("signature.html.hbs");
        std::fs::write(&path, content).expect("Failed to write template");
        path
    }

    pub fn write_signature(&self, file_name: &str) {
        std::fs::write(self.output_dir().join(file_name), "<p>signature</p>")
            .expect("Failed to write signature");
    }

    /// Fake admin tool that logs its arguments and exits non-zero for `fail_for`
    pub fn fake_tool(&self, fail_for: Option<&str>) -> PathBuf {
        let tool = self.path().join("fake-gam");
        let script = format!(
            "#!/bin/bash\necho \"$*\" >> \"{log}\"\nif [ \"$2\" = \"{fail}\" ]; then\n  echo \"ERROR: $2 not updated\" >&2\n  exit 1\nfi\necho \"Setting signature for $2\"\n",
            log = self.calls_log().display(),
            fail = fail_for.unwrap_or("")
        );
        std::fs::write(&tool, script).expect("Failed to write fake tool");
        let mut perms = std::fs::metadata(&tool).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&tool, perms).expect("Failed to make fake tool executable");
        tool
    }

    pub fn calls_log(&self) -> PathBuf {
        self.path().join("calls.log")
    }

    /// Accounts the fake tool was invoked for, in order
    pub fn pushed_accounts(&self) -> Vec<String> {
        std::fs::read_to_string(self.calls_log())
            .map(|log| {
                log.lines()
                    .filter_map(|line| line.split_whitespace().nth(1))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}
