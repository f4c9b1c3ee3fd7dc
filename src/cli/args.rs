// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the global logging flags and the run, validate, push, and init subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sigsync")]
#[command(about = "Render email signatures from a spreadsheet and push them to mailboxes")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Only print warnings and errors to the console"
    )]
    pub quiet: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Also write the log to this file")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch users, render their signatures, and push them when confirmed
    Run {
        #[arg(long, help = "Push the rendered signatures (otherwise a dry run)")]
        confirm: bool,

        #[command(flatten)]
        overrides: SourceOverrides,
    },

    /// Fetch and validate the spreadsheet without writing anything
    Validate {
        #[command(flatten)]
        overrides: SourceOverrides,
    },

    /// Push signatures that were already rendered into the output directory
    Push {
        #[arg(long, help = "Invoke the admin tool (otherwise only list accounts)")]
        confirm: bool,

        #[command(flatten)]
        overrides: TargetOverrides,
    },

    /// Write a starter configuration and signature template
    Init {
        #[arg(short, long, help = "Directory to write into", default_value = ".")]
        output_dir: PathBuf,

        #[arg(long, help = "Overwrite existing files")]
        force: bool,
    },
}

/// Overrides for where rows come from and how they are rendered
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SourceOverrides {
    #[arg(long, help = "Spreadsheet URL")]
    pub url: Option<String>,

    #[arg(long, help = "Worksheet (page) name")]
    pub worksheet: Option<String>,

    #[arg(short, long, help = "Signature template file")]
    pub template: Option<PathBuf>,

    #[command(flatten)]
    pub target: TargetOverrides,
}

/// Overrides for where signatures are written and pushed
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TargetOverrides {
    #[arg(short, long, help = "Email domain of the accounts")]
    pub domain: Option<String>,

    #[arg(short, long, help = "Directory for rendered signatures")]
    pub output_dir: Option<PathBuf>,

    #[arg(long, help = "Path to the admin tool")]
    pub gam: Option<PathBuf>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
