//! Input validation command
//!
//! Local JSON and structural checks run first; only when they pass is the
//! external runner asked for a dry-run of the collection/environment
//! pairing. Malformed input never reaches the runner.

use anyhow::Result;

use crate::cli::Output;
use crate::config::RunConfig;
use crate::preflight;
use crate::validation;

/// Execute the validate command
pub async fn execute(output: &Output) -> Result<()> {
    let config = RunConfig::from_env();
    output.header("🔎 Collection validation");

    for path in [&config.collection, &config.environment] {
        preflight::check_file_exists(path)?;
    }

    output.step("Checking input files are well-formed");
    validation::validate_inputs(&config)?;
    output.success("Input files are well-formed");

    // Dry-run needs the runner binary; local checks above do not.
    preflight::check_tool_present(&config.runner_bin)?;

    output.step("Dry-running the collection (no network calls)");
    validation::dry_run(&config, output)?;
    output.success("Collection and environment pairing is valid");

    Ok(())
}
