// ABOUTME: Push agent that runs the admin tool once per rendered signature file
// ABOUTME: Discovers {email}.html files for the target domain and pushes them strictly in sequence

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::fs;
use tokio::process::Command;
use tracing::{debug, error, info};

use super::error::{PushError, Result};
use super::result::PushResult;

/// A mailbox whose rendered signature is waiting to be pushed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub email: String,
    pub signature_path: PathBuf,
}

pub struct PushAgent {
    tool: PathBuf,
    domain: String,
}

impl PushAgent {
    pub fn new(tool: impl Into<PathBuf>, domain: &str) -> Self {
        Self {
            tool: tool.into(),
            domain: domain.trim().trim_start_matches('@').to_string(),
        }
    }

    pub fn tool(&self) -> &Path {
        &self.tool
    }

    /// Find every `*@{domain}.html` file in `dir`, sorted by account
    pub async fn discover_accounts(&self, dir: &Path) -> Result<Vec<Account>> {
        let dir_error = |source| PushError::DirectoryError {
            path: dir.to_path_buf(),
            source,
        };

        let suffix = format!("@{}.html", self.domain);
        let mut accounts = Vec::new();
        let mut entries = fs::read_dir(dir).await.map_err(dir_error)?;

        while let Some(entry) = entries.next_entry().await.map_err(dir_error)? {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if !name.ends_with(&suffix) || name.len() == suffix.len() {
                continue;
            }
            if !fs::metadata(entry.path()).await.map_err(dir_error)?.is_file() {
                continue;
            }
            if let Some(email) = name.strip_suffix(".html") {
                accounts.push(Account {
                    email: email.to_string(),
                    signature_path: entry.path(),
                });
            }
        }

        // Directory order is platform dependent; push in a stable order
        accounts.sort_by(|a, b| a.email.cmp(&b.email));

        debug!(
            "Discovered {} signature files for {} in {}",
            accounts.len(),
            self.domain,
            dir.display()
        );
        Ok(accounts)
    }

    /// Run `<tool> user <email> signature file <path> html` for one account
    pub async fn push(&self, account: &Account) -> Result<PushResult> {
        let start_time = chrono::Utc::now();
        info!("Pushing signature for {}", account.email);

        let output = Command::new(&self.tool)
            .arg("user")
            .arg(&account.email)
            .arg("signature")
            .arg("file")
            .arg(&account.signature_path)
            .arg("html")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| PushError::SpawnError {
                tool: self.tool.clone(),
                email: account.email.clone(),
                source,
            })?;

        let result = PushResult::from_output(account.email.clone(), &output, start_time);

        if !result.stdout.trim().is_empty() {
            debug!("{}: {}", account.email, result.stdout.trim());
        }
        if !result.stderr.trim().is_empty() {
            error!("{}: {}", account.email, result.stderr.trim());
        }

        if !result.is_success() {
            return Err(PushError::ToolFailed {
                email: result.email,
                exit_code: result.exit_code,
                stderr: result.stderr.trim().to_string(),
            });
        }

        Ok(result)
    }

    /// Push every discovered account, stopping at the first failure
    pub async fn push_all(&self, dir: &Path) -> Result<Vec<PushResult>> {
        let accounts = self.discover_accounts(dir).await?;
        self.push_accounts(&accounts).await
    }

    pub async fn push_accounts(&self, accounts: &[Account]) -> Result<Vec<PushResult>> {
        let mut results = Vec::with_capacity(accounts.len());
        for account in accounts {
            results.push(self.push(account).await?);
        }

        info!("Pushed {} signatures", results.len());
        Ok(results)
    }
}

/// Resolve the admin tool to an existing file, searching `PATH` for bare names
pub fn locate_tool(tool: &Path) -> Result<PathBuf> {
    let not_found = || PushError::ToolNotFound {
        tool: tool.to_path_buf(),
    };

    if tool.components().count() > 1 || tool.is_absolute() {
        return if tool.is_file() {
            Ok(tool.to_path_buf())
        } else {
            Err(not_found())
        };
    }

    let path_var = std::env::var_os("PATH").ok_or_else(not_found)?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(tool))
        .find(|candidate| candidate.is_file())
        .ok_or_else(not_found)
}
