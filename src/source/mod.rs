// ABOUTME: Row source module for sigsync
// ABOUTME: Defines the RowSource seam and the Google Sheets implementation behind it

pub mod error;
pub mod sheets;

pub use error::{Result, SourceError};
pub use sheets::{Credentials, SheetLocator, SheetsRowSource};

use async_trait::async_trait;

use crate::records::RawRow;

/// Produces the raw rows of one worksheet, header first
#[async_trait]
pub trait RowSource: Send + Sync {
    async fn fetch_rows(&self) -> Result<Vec<RawRow>>;

    /// Human readable name of the page being read, used in logs and errors
    fn describe(&self) -> String;
}

/// Fail when a fetched page holds nothing beyond its header row
pub fn require_data_rows(rows: &[RawRow], source_name: &str) -> Result<()> {
    if rows.len() < 2 {
        return Err(SourceError::EmptySheet {
            source_name: source_name.to_string(),
        });
    }
    Ok(())
}
