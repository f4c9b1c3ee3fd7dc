// ABOUTME: Command implementations for the sigsync CLI
// ABOUTME: Handles execution of run, validate, push, and init commands

use anyhow::Result;
use std::path::PathBuf;
use tracing::{info, warn};

use super::args::{SourceOverrides, TargetOverrides};
use super::config::Config;
use crate::pipeline::{self, Pipeline};
use crate::push::PushAgent;
use crate::source::SheetsRowSource;
use crate::template::SignatureRenderer;

/// Fetch, render, and (when confirmed) push every signature
pub async fn run_signatures(
    confirm: bool,
    overrides: &SourceOverrides,
    config: &Config,
) -> Result<()> {
    let mut config = config.clone();
    config.apply_source_overrides(overrides);

    // Every configuration problem surfaces here, before the spreadsheet is read
    let settings = config.run_settings(confirm)?;
    let renderer = SignatureRenderer::from_file(&settings.template)?;
    let source = SheetsRowSource::new(
        &settings.spreadsheet_url,
        &settings.worksheet,
        config.credentials(),
        config.sheets.api_base.as_deref(),
    )?;

    let mut pipeline = Pipeline::new(&settings.domain, &settings.output_dir, renderer);
    if let Some(gam_path) = settings.gam_path {
        pipeline = pipeline.with_push(PushAgent::new(gam_path, &settings.domain));
    } else {
        warn!("Dry run: signatures will be rendered but not pushed (use --confirm to push)");
    }

    let report = pipeline.run(&source).await?;
    report.log_summary();

    Ok(())
}

/// Fetch and validate the spreadsheet, and check the template compiles
pub async fn validate_sheet(overrides: &SourceOverrides, config: &Config) -> Result<()> {
    let mut config = config.clone();
    config.apply_source_overrides(overrides);

    let url = config.require_url()?;
    let domain = config.require_domain()?;
    if config.template.is_some() {
        let template = config.require_template()?;
        SignatureRenderer::from_file(template)?;
        info!("Template {} compiles", template.display());
    }

    let source = SheetsRowSource::new(
        url,
        &config.worksheet,
        config.credentials(),
        config.sheets.api_base.as_deref(),
    )?;

    let records = pipeline::load_records(&source, domain).await?;

    println!("✓ Worksheet '{}' is valid", config.worksheet);
    println!("  Users: {}", records.len());
    println!("  Domain: {}", domain);

    Ok(())
}

/// Push previously rendered signatures from the output directory
pub async fn push_signatures(
    confirm: bool,
    overrides: &TargetOverrides,
    config: &Config,
) -> Result<()> {
    let mut config = config.clone();
    config.apply_target_overrides(overrides);

    let domain = config.require_domain()?;
    if !config.output_dir.is_dir() {
        return Err(anyhow::anyhow!(
            "Output directory not found: {}",
            config.output_dir.display()
        ));
    }

    let tool = if confirm {
        config.require_tool()?
    } else {
        config.gam_path.clone()
    };
    let agent = PushAgent::new(tool, domain);
    let accounts = agent.discover_accounts(&config.output_dir).await?;

    if accounts.is_empty() {
        warn!(
            "No signatures for {} found in {}",
            domain,
            config.output_dir.display()
        );
        return Ok(());
    }

    if !confirm {
        for account in &accounts {
            info!(
                "Would push {} from {}",
                account.email,
                account.signature_path.display()
            );
        }
        warn!(
            "Dry run: {} signatures not pushed (use --confirm to push)",
            accounts.len()
        );
        return Ok(());
    }

    let results = agent.push_accounts(&accounts).await?;
    info!("Push completed for {} accounts", results.len());

    Ok(())
}

/// Write a starter configuration and signature template
pub async fn init_project(output_dir: PathBuf, force: bool) -> Result<()> {
    info!("Initializing sigsync in {}", output_dir.display());

    if !output_dir.exists() {
        std::fs::create_dir_all(&output_dir)?;
    }

    let files = [
        (output_dir.join("sigsync.yaml"), starter_config()),
        (
            output_dir.join("signature.html.hbs"),
            starter_template().to_string(),
        ),
    ];

    for (path, _) in &files {
        if path.exists() && !force {
            return Err(anyhow::anyhow!(
                "File already exists: {} (use --force to overwrite)",
                path.display()
            ));
        }
    }

    for (path, content) in files {
        std::fs::write(&path, content)?;
        info!("Created {}", path.display());
    }

    Ok(())
}

fn starter_config() -> String {
    r#"# sigsync configuration
spreadsheet_url: "https://docs.google.com/spreadsheets/d/<spreadsheet-id>/edit"
worksheet: Sheet1
domain: example.com
template: signature.html.hbs
output_dir: signatures
gam_path: gam

sheets:
  # One of access_token, token_command, or api_key
  token_command: "gcloud auth print-access-token"

logging:
  level: info
  format: pretty
"#
    .to_string()
}

/// Columns: email, name, title, phone (NNN-NNN-NNNN), pronouns
fn starter_template() -> &'static str {
    r#"<table cellpadding="0" cellspacing="0" style="font-family: Arial, sans-serif; font-size: 12px;">
  <tr>
    <td>
      <strong>{{name}}</strong>{{#if pronouns}} <span style="color: #777;">({{pronouns}})</span>{{/if}}<br>
      {{#if title}}{{title}}<br>{{/if}}
      <a href="mailto:{{email}}">{{email}}</a>
      {{#if phone_dotted}}<br><a href="tel:{{phone_hyphenated}}">{{phone_dotted}}</a>{{/if}}
    </td>
  </tr>
</table>
"#
}
