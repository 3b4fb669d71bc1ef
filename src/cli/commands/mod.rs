//! Command implementations for the apiprobe CLI
//!
//! Each run mode is organized into its own module. All commands resolve a
//! [`crate::config::RunConfig`] once and pass it by reference downstream.

pub mod clean;
pub mod full;
pub mod run;
pub mod security;
pub mod validate;

use anyhow::Result;

use crate::cli::Output;
use crate::config::RunConfig;
use crate::preflight;

/// Run the preflight phase, printing warnings and aborting on any fatal
/// finding. No run proceeds past this point with a missing input file or
/// an unresolvable runner binary.
pub(crate) fn ensure_preflight(config: &RunConfig, output: &Output) -> Result<()> {
    let result = preflight::run(config);
    for warning in &result.warnings {
        output.warning(warning);
    }
    if result.ok() {
        output.verbose("preflight checks passed");
        Ok(())
    } else {
        for error in &result.errors {
            output.error(error);
        }
        anyhow::bail!("preflight checks failed")
    }
}
