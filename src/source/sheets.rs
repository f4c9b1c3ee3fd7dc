// ABOUTME: Google Sheets implementation of the row source
// ABOUTME: Reads one worksheet through the Sheets v4 values API with opaque credentials

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tokio::process::Command;
use tracing::{debug, info};

use super::error::{Result, SourceError};
use super::RowSource;
use crate::records::RawRow;

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";

/// How requests to the Sheets API are authorized. Obtaining the token or key
/// is left to external tooling.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Credentials {
    #[default]
    Anonymous,
    AccessToken(String),
    ApiKey(String),
    /// Shell command whose stdout is a bearer token
    TokenCommand(String),
}

/// Spreadsheet identity extracted from a browser URL such as
/// `https://docs.google.com/spreadsheets/d/<id>/edit#gid=0`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLocator {
    pub spreadsheet_id: String,
}

impl SheetLocator {
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |reason: &str| SourceError::InvalidUrl {
            url: raw.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;
        match url.host_str() {
            Some(host) if !host.is_empty() => {}
            _ => return Err(invalid("missing host")),
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.collect())
            .unwrap_or_default();

        let spreadsheet_id = segments
            .windows(3)
            .find(|window| window[0] == "spreadsheets" && window[1] == "d")
            .map(|window| window[2])
            .filter(|id| !id.is_empty())
            .ok_or_else(|| invalid("no /spreadsheets/d/<id> segment"))?;

        Ok(Self {
            spreadsheet_id: spreadsheet_id.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<JsonValue>>,
}

pub struct SheetsRowSource {
    client: Client,
    api_base: String,
    locator: SheetLocator,
    worksheet: String,
    credentials: Credentials,
}

impl SheetsRowSource {
    pub fn new(
        spreadsheet_url: &str,
        worksheet: &str,
        credentials: Credentials,
        api_base: Option<&str>,
    ) -> Result<Self> {
        let locator = SheetLocator::parse(spreadsheet_url)?;
        let api_base = api_base.unwrap_or(DEFAULT_API_BASE).to_string();
        // Reject a bad API base before any request is made
        Url::parse(&api_base).map_err(|e| SourceError::InvalidUrl {
            url: api_base.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client: Client::new(),
            api_base,
            locator,
            worksheet: worksheet.to_string(),
            credentials,
        })
    }

    /// Use a preconfigured HTTP client (proxies, timeouts, TLS roots)
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn locator(&self) -> &SheetLocator {
        &self.locator
    }

    /// Full `values.get` URL for the configured worksheet
    pub fn endpoint(&self) -> Result<Url> {
        let mut url = Url::parse(&self.api_base).map_err(|e| SourceError::InvalidUrl {
            url: self.api_base.clone(),
            reason: e.to_string(),
        })?;

        let range = quote_range(&self.worksheet);
        url.path_segments_mut()
            .map_err(|_| SourceError::InvalidUrl {
                url: self.api_base.clone(),
                reason: "API base cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.locator.spreadsheet_id.as_str(),
                "values",
                range.as_str(),
            ]);
        url.query_pairs_mut().append_pair("majorDimension", "ROWS");

        if let Credentials::ApiKey(key) = &self.credentials {
            url.query_pairs_mut().append_pair("key", key);
        }

        Ok(url)
    }

    async fn bearer_token(&self) -> Result<Option<String>> {
        match &self.credentials {
            Credentials::AccessToken(token) => Ok(Some(token.clone())),
            Credentials::TokenCommand(command) => run_token_command(command).await.map(Some),
            Credentials::Anonymous | Credentials::ApiKey(_) => Ok(None),
        }
    }

    async fn request_rows(&self) -> Result<Vec<RawRow>> {
        let endpoint = self.endpoint()?;
        debug!("Requesting worksheet '{}'", self.worksheet);

        let mut request = self.client.get(endpoint);
        if let Some(token) = self.bearer_token().await? {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SourceError::StatusError { status, body });
        }

        decode_rows(&body)
    }
}

#[async_trait]
impl RowSource for SheetsRowSource {
    async fn fetch_rows(&self) -> Result<Vec<RawRow>> {
        let rows = self.request_rows().await?;
        info!(
            "Fetched {} rows from worksheet '{}'",
            rows.len(),
            self.worksheet
        );
        Ok(rows)
    }

    fn describe(&self) -> String {
        format!(
            "worksheet '{}' of spreadsheet {}",
            self.worksheet, self.locator.spreadsheet_id
        )
    }
}

/// Decode a `ValueRange` body into rows of cell text
pub(crate) fn decode_rows(body: &str) -> Result<Vec<RawRow>> {
    let range: ValueRange = serde_json::from_str(body)?;
    Ok(range
        .values
        .into_iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

fn cell_text(cell: &JsonValue) -> String {
    match cell {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

/// A1 notation needs single quotes around sheet names with spaces or symbols
fn quote_range(worksheet: &str) -> String {
    if worksheet.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        worksheet.to_string()
    } else {
        format!("'{}'", worksheet.replace('\'', "''"))
    }
}

async fn run_token_command(command: &str) -> Result<String> {
    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .output()
        .await
        .map_err(|e| SourceError::CredentialError {
            message: format!("failed to run '{}': {}", command, e),
        })?;

    if !output.status.success() {
        return Err(SourceError::CredentialError {
            message: format!(
                "'{}' exited with {}: {}",
                command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(SourceError::CredentialError {
            message: format!("'{}' printed no token", command),
        });
    }
    Ok(token)
}
