//! Input file validation
//!
//! Checks that the collection and environment files are well-formed JSON
//! and carry the collaborator's documented shape, then optionally asks the
//! external runner for a structural dry-run of the pairing. Malformed
//! input is rejected before the runner is ever invoked.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::cli::Output;
use crate::config::RunConfig;
use crate::error::OrchestratorError;
use crate::runner::RunPlan;

/// Parse a file as JSON, failing with `MalformedInput` otherwise.
pub fn validate_json(path: &Path) -> Result<Value, OrchestratorError> {
    let raw = fs::read_to_string(path).map_err(|source| OrchestratorError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|err| OrchestratorError::MalformedInput {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

/// Structural checks on the collection document: it must be an object with
/// an `info` block and an `item` array of requests.
pub fn check_collection_shape(path: &Path, doc: &Value) -> Result<(), OrchestratorError> {
    let obj = doc.as_object().ok_or_else(|| shape_error(path, "top level is not an object"))?;
    if !obj.contains_key("info") {
        return Err(shape_error(path, "missing `info` block"));
    }
    match obj.get("item") {
        Some(Value::Array(items)) if !items.is_empty() => Ok(()),
        Some(Value::Array(_)) => Err(shape_error(path, "`item` array is empty")),
        _ => Err(shape_error(path, "missing `item` array")),
    }
}

/// Structural check on the environment document: it must carry a `values`
/// array of key/value entries.
pub fn check_environment_shape(path: &Path, doc: &Value) -> Result<(), OrchestratorError> {
    match doc.get("values") {
        Some(Value::Array(_)) => Ok(()),
        _ => Err(shape_error(path, "missing `values` array")),
    }
}

fn shape_error(path: &Path, reason: &str) -> OrchestratorError {
    OrchestratorError::ValidationFailed(format!("{}: {}", path.display(), reason))
}

/// Validate both input files locally, without touching the runner.
pub fn validate_inputs(config: &RunConfig) -> Result<(), OrchestratorError> {
    let collection = validate_json(&config.collection)?;
    check_collection_shape(&config.collection, &collection)?;
    let environment = validate_json(&config.environment)?;
    check_environment_shape(&config.environment, &environment)?;
    Ok(())
}

/// Ask the external runner to parse the collection/environment pairing
/// without issuing real network calls.
pub fn dry_run(config: &RunConfig, output: &Output) -> crate::Result<()> {
    let outcome = RunPlan::dry_run(config).invoke(output)?;
    if outcome.success() {
        Ok(())
    } else {
        Err(OrchestratorError::ValidationFailed(format!(
            "runner dry-run rejected the collection (exit code {})",
            outcome.exit_code
        ))
        .into())
    }
}
