// ABOUTME: Summary of one signature run
// ABOUTME: Collects counts and push results so the CLI can log or serialize the outcome

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::push::PushResult;

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub dry_run: bool,
    pub records_loaded: usize,
    pub signatures_written: Vec<PathBuf>,
    pub pushes: Vec<PushResult>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: Option<Duration>,
}

impl RunReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            records_loaded: 0,
            signatures_written: Vec::new(),
            pushes: Vec::new(),
            start_time: Utc::now(),
            end_time: None,
            duration: None,
        }
    }

    pub fn mark_completed(&mut self) {
        let end_time = Utc::now();
        self.duration = (end_time - self.start_time).to_std().ok();
        self.end_time = Some(end_time);
    }

    pub fn pushed_count(&self) -> usize {
        self.pushes.iter().filter(|p| p.is_success()).count()
    }

    pub fn log_summary(&self) {
        info!(
            "Loaded {} users, wrote {} signatures",
            self.records_loaded,
            self.signatures_written.len()
        );
        if self.dry_run {
            info!("Dry run: no signatures were pushed (use --confirm to push)");
        } else {
            info!("Pushed {} signatures", self.pushed_count());
        }
        if let Some(duration) = self.duration {
            info!("Finished in {:.2}s", duration.as_secs_f64());
        }
    }
}
