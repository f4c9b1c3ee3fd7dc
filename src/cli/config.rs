// ABOUTME: Configuration management for sigsync
// ABOUTME: Loads YAML config, merges environment variables and CLI overrides, and runs preflight checks

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::args::{SourceOverrides, TargetOverrides};
use crate::push::locate_tool;
use crate::source::{Credentials, SheetLocator};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub spreadsheet_url: Option<String>,
    pub worksheet: String,
    pub domain: Option<String>,
    pub template: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub gam_path: PathBuf,
    pub sheets: SheetsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SheetsConfig {
    pub api_base: Option<String>,
    pub access_token: Option<String>,
    pub api_key: Option<String>,
    pub token_command: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<PathBuf>,
}

/// Everything a run needs, checked before any remote call is made
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub spreadsheet_url: String,
    pub worksheet: String,
    pub domain: String,
    pub template: PathBuf,
    pub output_dir: PathBuf,
    /// Resolved admin tool, present only when pushing is confirmed
    pub gam_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spreadsheet_url: None,
            worksheet: "Sheet1".to_string(),
            domain: None,
            template: None,
            output_dir: PathBuf::from("signatures"),
            gam_path: PathBuf::from("gam"),
            sheets: SheetsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(anyhow::anyhow!(
                        "Configuration file not found: {}",
                        p.display()
                    ));
                }
                p
            }
            None => Self::find_config_file(),
        };

        let mut config: Config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            serde_yaml::from_str(&contents).map_err(|e| {
                anyhow::anyhow!("Invalid configuration {}: {}", config_path.display(), e)
            })?
        } else {
            Config::default()
        };

        config.merge_env();
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = [
            PathBuf::from("sigsync.yaml"),
            PathBuf::from("sigsync.yml"),
            PathBuf::from(".sigsync.yaml"),
            PathBuf::from(".sigsync.yml"),
        ];

        for path in possible_paths {
            if path.exists() {
                return path;
            }
        }

        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".sigsync").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        // Default path (may not exist)
        PathBuf::from("sigsync.yaml")
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        if let Some(url) = var("SIGSYNC_SPREADSHEET_URL") {
            self.spreadsheet_url = Some(url);
        }
        if let Some(worksheet) = var("SIGSYNC_WORKSHEET") {
            self.worksheet = worksheet;
        }
        if let Some(domain) = var("SIGSYNC_DOMAIN") {
            self.domain = Some(domain);
        }
        if let Some(template) = var("SIGSYNC_TEMPLATE") {
            self.template = Some(PathBuf::from(template));
        }
        if let Some(output_dir) = var("SIGSYNC_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(output_dir);
        }
        if let Some(gam_path) = var("SIGSYNC_GAM_PATH") {
            self.gam_path = PathBuf::from(gam_path);
        }

        // Credentials
        if let Some(token) = var("SIGSYNC_ACCESS_TOKEN") {
            self.sheets.access_token = Some(token);
        }
        if let Some(key) = var("SIGSYNC_API_KEY") {
            self.sheets.api_key = Some(key);
        }

        // Logging
        if let Some(level) = var("SIGSYNC_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("SIGSYNC_LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Some(file) = var("SIGSYNC_LOG_FILE") {
            self.logging.file = Some(PathBuf::from(file));
        }
    }

    /// Apply command-line overrides for the spreadsheet and template
    pub fn apply_source_overrides(&mut self, overrides: &SourceOverrides) {
        if let Some(ref url) = overrides.url {
            self.spreadsheet_url = Some(url.clone());
        }
        if let Some(ref worksheet) = overrides.worksheet {
            self.worksheet = worksheet.clone();
        }
        if let Some(ref template) = overrides.template {
            self.template = Some(template.clone());
        }
        self.apply_target_overrides(&overrides.target);
    }

    /// Apply command-line overrides for the push target
    pub fn apply_target_overrides(&mut self, overrides: &TargetOverrides) {
        if let Some(ref domain) = overrides.domain {
            self.domain = Some(domain.clone());
        }
        if let Some(ref output_dir) = overrides.output_dir {
            self.output_dir = output_dir.clone();
        }
        if let Some(ref gam) = overrides.gam {
            self.gam_path = gam.clone();
        }
    }

    /// Credentials for the Sheets API; an explicit token wins over a token
    /// command, which wins over an API key
    pub fn credentials(&self) -> Credentials {
        let sheets = &self.sheets;
        if let Some(ref token) = sheets.access_token {
            Credentials::AccessToken(token.clone())
        } else if let Some(ref command) = sheets.token_command {
            Credentials::TokenCommand(command.clone())
        } else if let Some(ref key) = sheets.api_key {
            Credentials::ApiKey(key.clone())
        } else {
            Credentials::Anonymous
        }
    }

    pub fn require_url(&self) -> Result<&str> {
        match self.spreadsheet_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => {
                SheetLocator::parse(url)?;
                Ok(url)
            }
            _ => Err(anyhow::anyhow!(
                "No spreadsheet URL configured (set spreadsheet_url or pass --url)"
            )),
        }
    }

    pub fn require_domain(&self) -> Result<&str> {
        match self
            .domain
            .as_deref()
            .map(|d| d.trim().trim_start_matches('@'))
        {
            Some(domain) if !domain.is_empty() => Ok(domain),
            _ => Err(anyhow::anyhow!(
                "No domain configured (set domain or pass --domain)"
            )),
        }
    }

    pub fn require_template(&self) -> Result<&Path> {
        let template = self.template.as_deref().ok_or_else(|| {
            anyhow::anyhow!("No signature template configured (set template or pass --template)")
        })?;
        if !template.is_file() {
            return Err(anyhow::anyhow!(
                "Signature template not found: {}",
                template.display()
            ));
        }
        Ok(template)
    }

    /// Make sure the output directory exists, creating it if needed
    pub fn ensure_output_dir(&self) -> Result<&Path> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            anyhow::anyhow!(
                "Cannot create output directory {}: {}",
                self.output_dir.display(),
                e
            )
        })?;
        Ok(&self.output_dir)
    }

    /// Resolve the admin tool, failing if it cannot be found
    pub fn require_tool(&self) -> Result<PathBuf> {
        locate_tool(&self.gam_path).map_err(|e| anyhow::anyhow!("{}", e))
    }

    /// Check every configuration value a run depends on
    pub fn run_settings(&self, confirm: bool) -> Result<RunSettings> {
        let spreadsheet_url = self.require_url()?.to_string();
        let domain = self.require_domain()?.to_string();
        let template = self.require_template()?.to_path_buf();
        let gam_path = if confirm {
            Some(self.require_tool()?)
        } else {
            None
        };
        let output_dir = self.ensure_output_dir()?.to_path_buf();

        Ok(RunSettings {
            spreadsheet_url,
            worksheet: self.worksheet.clone(),
            domain,
            template,
            output_dir,
            gam_path,
        })
    }
}
