// ABOUTME: Main library module for sigsync
// ABOUTME: Exports the row source, normalizer, renderer, push agent, and the CLI built on them

pub mod cli;
pub mod pipeline;
pub mod push;
pub mod records;
pub mod source;
pub mod template;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use pipeline::{Pipeline, RunReport};
pub use push::{PushAgent, PushResult};
pub use records::{normalize, RawRow, UserRecord};
pub use source::{RowSource, SheetsRowSource};
pub use template::SignatureRenderer;

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
