// ABOUTME: CLI module for sigsync
// ABOUTME: Exports command line interface components and main application logic

pub mod app;
pub mod args;
pub mod commands;
pub mod config;
pub mod logging;

pub use app::App;
pub use args::{Args, Commands, SourceOverrides, TargetOverrides};
pub use config::{Config, RunSettings};
pub use logging::LogContext;
