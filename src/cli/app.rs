// ABOUTME: Main application orchestration for sigsync CLI
// ABOUTME: Owns configuration and the logging context and dispatches the chosen command

use anyhow::Result;
use tracing::{debug, error, info};

use super::commands;
use super::{Args, Commands, Config, LogContext};

pub struct App {
    config: Config,
    log: Option<LogContext>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Self {
        Self { config, log: None }
    }

    /// Create application from parsed command line arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        let config = Config::load(args.config.clone())?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Initialize logging once; later calls are no-ops
    pub fn init_logging(&mut self, args: &Args) -> Result<()> {
        if self.log.is_none() {
            self.log = Some(LogContext::init(
                &self.config.logging,
                args.verbose,
                args.quiet,
                args.no_color,
                args.log_file.as_deref(),
            )?);
        }
        Ok(())
    }

    /// Run the application with parsed arguments
    pub async fn run(&mut self, args: Args) -> Result<()> {
        self.init_logging(&args)?;

        info!("Starting sigsync v{}", env!("CARGO_PKG_VERSION"));
        debug!("Configuration loaded from: {:?}", args.config);

        let result = match args.command {
            Commands::Run { confirm, overrides } => {
                commands::run_signatures(confirm, &overrides, &self.config).await
            }

            Commands::Validate { overrides } => {
                commands::validate_sheet(&overrides, &self.config).await
            }

            Commands::Push { confirm, overrides } => {
                commands::push_signatures(confirm, &overrides, &self.config).await
            }

            Commands::Init { output_dir, force } => {
                commands::init_project(output_dir, force).await
            }
        };

        // The only place a fatal error is reported
        if let Err(ref e) = result {
            error!("{:#}", e);
        }
        result
    }
}
