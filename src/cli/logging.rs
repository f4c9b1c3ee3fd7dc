// ABOUTME: Logging context for sigsync built once at startup
// ABOUTME: Wires console and optional file output into tracing and flushes the file on drop

use anyhow::Result;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use super::config::LoggingConfig;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Console and file logging for one process. Keep it alive until exit so the
/// file writer is flushed when it is dropped.
pub struct LogContext {
    _file_guard: Option<WorkerGuard>,
}

impl LogContext {
    /// Install the global subscriber
    pub fn init(
        config: &LoggingConfig,
        verbose: bool,
        quiet: bool,
        no_color: bool,
        log_file: Option<&Path>,
    ) -> Result<Self> {
        let log_level = if verbose { "debug" } else { config.level.as_str() };
        let env_filter =
            || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        let console_filter = if quiet {
            EnvFilter::new("warn")
        } else {
            env_filter()
        };

        let mut layers: Vec<BoxedLayer> = vec![console_layer(&config.format, no_color)
            .with_filter(console_filter)
            .boxed()];

        let file_guard = match log_file.or(config.file.as_deref()) {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                let (writer, guard) = tracing_appender::non_blocking(file);

                layers.push(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(false)
                        .with_filter(env_filter())
                        .boxed(),
                );
                Some(guard)
            }
            None => None,
        };

        tracing_subscriber::registry()
            .with(layers)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

        debug!("Logging initialized with level: {}", log_level);
        Ok(Self {
            _file_guard: file_guard,
        })
    }
}

fn console_layer(format: &str, no_color: bool) -> BoxedLayer {
    match format {
        "compact" => fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_ansi(!no_color)
            .with_target(false)
            .boxed(),
        _ => fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(!no_color)
            .with_target(false)
            .boxed(),
    }
}
