//! Command-line interface for apiprobe
//!
//! One positional subcommand selects the run mode. Unknown or absent
//! subcommands fall softly into help: the usage table is printed and the
//! process exits 0 with no side effects.

use std::ffi::OsString;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

pub mod commands;
mod output;

pub use output::Output;

/// apiprobe - API collection test orchestrator
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable quiet output (minimal)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available run modes
#[derive(Subcommand)]
pub enum Commands {
    /// Run the collection, stopping on the first failing assertion
    Basic,
    /// Run with html + json report export and a longer request timeout
    Detailed,
    /// Performance run: json report, per-request delay, short timeout
    Performance,
    /// Run only the critical-path subset of the collection
    Smoke,
    /// Validate input files and dry-run the collection without network calls
    Validate,
    /// Scan collection and environment files for leaked credentials
    Security,
    /// Full pipeline: validate, scan, detailed + performance runs, summary, prune
    Full,
    /// Prune old reports (or remove all with --all)
    Clean {
        /// Remove every report artifact instead of applying retention
        #[arg(long)]
        all: bool,
    },
    /// Anything unrecognized is treated as a request for help
    #[command(external_subcommand)]
    External(Vec<OsString>),
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let output = Output::new(self.verbose, self.quiet);

        match self.command {
            Some(Commands::Basic) => {
                commands::run::execute(crate::runner::RunMode::Basic, &output).await
            }
            Some(Commands::Detailed) => {
                commands::run::execute(crate::runner::RunMode::Detailed, &output).await
            }
            Some(Commands::Performance) => {
                commands::run::execute(crate::runner::RunMode::Performance, &output).await
            }
            Some(Commands::Smoke) => {
                commands::run::execute(crate::runner::RunMode::Smoke, &output).await
            }
            Some(Commands::Validate) => commands::validate::execute(&output).await,
            Some(Commands::Security) => commands::security::execute(&output).await,
            Some(Commands::Full) => commands::full::execute(&output).await,
            Some(Commands::Clean { all }) => commands::clean::execute(all, &output).await,
            Some(Commands::External(_)) | None => {
                // Unknown tokens fail softly into help, never a hard error
                let mut cmd = Cli::command();
                cmd.print_help()?;
                Ok(())
            }
        }
    }
}
