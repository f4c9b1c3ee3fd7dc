// ABOUTME: Linear signature pipeline: fetch, normalize, render, then optionally push
// ABOUTME: Each stage runs to completion before the next and any failure ends the run

pub mod error;
pub mod report;

pub use error::{PipelineError, Result};
pub use report::RunReport;

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::push::PushAgent;
use crate::records::{self, UserRecord};
use crate::source::{self, RowSource};
use crate::template::SignatureRenderer;

pub struct Pipeline {
    domain: String,
    output_dir: PathBuf,
    renderer: SignatureRenderer,
    push_agent: Option<PushAgent>,
}

impl Pipeline {
    /// Build a dry-run pipeline; call [`Pipeline::with_push`] to enable pushing
    pub fn new(domain: &str, output_dir: impl Into<PathBuf>, renderer: SignatureRenderer) -> Self {
        Self {
            domain: domain.to_string(),
            output_dir: output_dir.into(),
            renderer,
            push_agent: None,
        }
    }

    pub fn with_push(mut self, agent: PushAgent) -> Self {
        self.push_agent = Some(agent);
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.push_agent.is_none()
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub async fn run(&self, source: &dyn RowSource) -> Result<RunReport> {
        let mut report = RunReport::new(self.is_dry_run());

        let records = load_records(source, &self.domain).await?;
        report.records_loaded = records.len();

        report.signatures_written = self.renderer.write_all(&records, &self.output_dir).await?;

        match &self.push_agent {
            Some(agent) => {
                debug!("Pushing with {}", agent.tool().display());
                report.pushes = agent.push_all(&self.output_dir).await?;
            }
            None => info!("Dry run: skipping push"),
        }

        report.mark_completed();
        Ok(report)
    }
}

/// Fetch the worksheet and turn it into validated records
pub async fn load_records(source: &dyn RowSource, domain: &str) -> Result<Vec<UserRecord>> {
    info!("Reading {}", source.describe());
    let rows = source.fetch_rows().await?;
    source::require_data_rows(&rows, &source.describe())?;

    let records = records::normalize(&rows, domain)?;
    info!("Validated {} users for {}", records.len(), domain);
    Ok(records)
}
