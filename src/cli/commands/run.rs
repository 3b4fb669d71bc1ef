//! Single-mode collection runs
//!
//! Drives one external-runner invocation for the basic, detailed,
//! performance, and smoke modes: preflight, report setup, invocation,
//! metric extraction, and summary for detailed runs.

use anyhow::Result;

use super::ensure_preflight;
use crate::cli::Output;
use crate::config::RunConfig;
use crate::error::OrchestratorError;
use crate::reports;
use crate::runner::{RunMode, RunOutcome, RunPlan};

/// Execute a single-mode run
pub async fn execute(mode: RunMode, output: &Output) -> Result<()> {
    let config = RunConfig::from_env();
    output.header(&format!("🌐 API test run: {}", mode.label()));

    ensure_preflight(&config, output)?;
    reports::setup(&config)?;

    let ts = reports::timestamp();
    let outcome = launch(mode, &config, &ts, output)?;

    if mode == RunMode::Detailed {
        let summary = reports::write_summary(&config, &ts, outcome.success())?;
        output.key_value("Summary", &summary.path.display().to_string());
    }

    if outcome.success() {
        output.success("All assertions passed");
        Ok(())
    } else {
        Err(OrchestratorError::RunFailed { code: outcome.exit_code }.into())
    }
}

/// Invoke the runner for one mode and report exported artifacts/metrics.
/// Shared with the full pipeline.
pub(crate) fn launch(
    mode: RunMode,
    config: &RunConfig,
    ts: &str,
    output: &Output,
) -> Result<RunOutcome> {
    output.step(&format!(
        "Running {} against {}",
        config.collection_name(),
        config.environment_name()
    ));

    let plan = RunPlan::for_mode(mode, config, ts);
    let outcome = plan.invoke(output)?;

    for artifact in &outcome.artifacts {
        if artifact.path.is_file() {
            output.key_value("Report", &artifact.path.display().to_string());
            if artifact.path.extension().is_some_and(|ext| ext == "json") {
                if let Some(metrics) = reports::extract_metrics(&artifact.path, output) {
                    reports::print_metrics(&metrics, output);
                }
            }
        } else {
            output.warning(&format!(
                "runner did not produce expected report {}",
                artifact.path.display()
            ));
        }
    }

    output.action_result(
        &format!("{} run", mode.label()),
        &format!("exit code {}", outcome.exit_code),
        outcome.success(),
    );
    Ok(outcome)
}
