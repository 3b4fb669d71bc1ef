//! Full pipeline command
//!
//! Ordering contract: preflight → report setup → validate → secret scan →
//! detailed run → performance run → summary → prune. Preflight or
//! validation failure aborts before any run. A failing run step does NOT
//! stop the summary or pruning steps; artifacts and report hygiene are
//! preserved even on test failure, and the first failing sub-run's exit
//! code is surfaced as the process exit code.

use anyhow::Result;

use super::{ensure_preflight, run, security};
use crate::cli::Output;
use crate::config::RunConfig;
use crate::error::OrchestratorError;
use crate::reports;
use crate::runner::RunMode;
use crate::security::SecretScanner;
use crate::validation;

/// Execute the full pipeline
pub async fn execute(output: &Output) -> Result<()> {
    let config = RunConfig::from_env();
    output.header("🚀 Full API test pipeline");

    // Fail-fast phase: nothing below runs if these fail.
    ensure_preflight(&config, output)?;
    reports::setup(&config)?;

    output.step("Validating input files");
    validation::validate_inputs(&config)?;
    validation::dry_run(&config, output)?;

    output.step("Scanning for secrets");
    let scanner = SecretScanner::new()?;
    let (status, matches) =
        scanner.scan_paths(&[config.collection.as_path(), config.environment.as_path()]);
    security::report(status, &matches, output);

    // Run phase: a failure here is remembered but does not stop the
    // summary or pruning steps below.
    let mut first_failure: Option<i32> = None;
    let mut all_passed = true;

    for mode in [RunMode::Detailed, RunMode::Performance] {
        let ts = reports::timestamp();
        match run::launch(mode, &config, &ts, output) {
            Ok(outcome) if outcome.success() => {}
            Ok(outcome) => {
                all_passed = false;
                first_failure.get_or_insert(outcome.exit_code);
                output.error(&format!(
                    "{} run failed (exit code {}), continuing with remaining steps",
                    mode.label(),
                    outcome.exit_code
                ));
            }
            Err(err) => {
                // Launch errors (runner vanished mid-pipeline) are treated
                // like a failed run so cleanup still happens.
                all_passed = false;
                first_failure.get_or_insert(1);
                output.error(&format!("{} run could not start: {}", mode.label(), err));
            }
        }
    }

    let ts = reports::timestamp();
    let summary = reports::write_summary(&config, &ts, all_passed)?;
    output.key_value("Summary", &summary.path.display().to_string());

    reports::prune(&config, output)?;

    match first_failure {
        None => {
            output.success("Full pipeline completed, all runs passed");
            Ok(())
        }
        Some(code) => Err(OrchestratorError::RunFailed { code }.into()),
    }
}
