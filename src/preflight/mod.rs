//! Preflight checks run before any collection execution
//!
//! Verifies the external runner binary resolves on PATH and the input
//! files exist. Both are fatal and abort the pipeline before any run
//! starts. A missing credential is advisory only, because the environment
//! file may supply it instead.

use std::path::Path;

use crate::config::RunConfig;
use crate::error::OrchestratorError;

/// Outcome of the preflight phase. Purely advisory, except that
/// `ok == false` halts the pipeline.
#[derive(Debug, Default)]
pub struct PreflightResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl PreflightResult {
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Resolve the external runner binary on PATH.
pub fn check_tool_present(runner_bin: &str) -> Result<(), OrchestratorError> {
    which::which(runner_bin)
        .map(|_| ())
        .map_err(|_| OrchestratorError::ToolMissing(runner_bin.to_string()))
}

/// Require an input file to exist. Fail-fast: no partial run.
pub fn check_file_exists(path: &Path) -> Result<(), OrchestratorError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(OrchestratorError::FileMissing(path.to_path_buf()))
    }
}

/// Advisory credential check. Returns a warning message when no API key
/// is configured.
pub fn check_credential(config: &RunConfig) -> Option<String> {
    match config.api_key {
        Some(_) => None,
        None => Some(
            "API_KEY is not set; relying on the environment file for credentials".to_string(),
        ),
    }
}

/// Run the full preflight phase against a configuration.
pub fn run(config: &RunConfig) -> PreflightResult {
    let mut result = PreflightResult::default();

    if let Err(err) = check_tool_present(&config.runner_bin) {
        result.errors.push(err.to_string());
    }
    for path in [&config.collection, &config.environment] {
        if let Err(err) = check_file_exists(path) {
            result.errors.push(err.to_string());
        }
    }
    if let Some(warning) = check_credential(config) {
        result.warnings.push(warning);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> RunConfig {
        let mut config = RunConfig::default();
        config.collection = dir.path().join("collection.json");
        config.environment = dir.path().join("environment.json");
        config.reports_dir = dir.path().join("reports");
        // Resolvable on any unix box, so tool presence never interferes
        // with the file-existence assertions below.
        config.runner_bin = "sh".to_string();
        config
    }

    #[test]
    fn missing_collection_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        fs::write(&config.environment, "{}").unwrap();

        let result = run(&config);
        assert!(!result.ok());
        assert!(result.errors.iter().any(|e| e.contains("collection.json")));
    }

    #[test]
    fn missing_credential_is_only_a_warning() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        fs::write(&config.collection, "{}").unwrap();
        fs::write(&config.environment, "{}").unwrap();

        let result = run(&config);
        assert!(result.ok(), "credential absence must not fail preflight");
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn credential_presence_does_not_mask_missing_files() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.api_key = Some("0123456789abcdef".to_string());

        let result = run(&config);
        assert!(!result.ok());
        assert_eq!(result.errors.len(), 2);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn unresolvable_runner_binary_is_fatal() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.runner_bin = "definitely-not-a-real-binary-7d3f".to_string();
        fs::write(&config.collection, "{}").unwrap();
        fs::write(&config.environment, "{}").unwrap();

        let result = run(&config);
        assert!(!result.ok());
        assert!(result.errors[0].contains("RUNNER_BIN"));
    }
}
