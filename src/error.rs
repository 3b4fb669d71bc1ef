//! Error taxonomy for the orchestration pipeline
//!
//! Fatal kinds abort the pipeline with a labeled error line and non-zero
//! exit; warnings (missing credential, metrics extraction, secret findings)
//! are printed through [`crate::cli::Output`] and never become errors.

use std::path::PathBuf;

/// Typed failures surfaced by the orchestration pipeline.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    /// The external collection runner binary cannot be resolved on PATH.
    #[error("runner binary `{0}` not found on PATH (install it or set RUNNER_BIN)")]
    ToolMissing(String),

    /// A required input file is absent. Fatal, aborts before any run.
    #[error("required file missing: {}", .0.display())]
    FileMissing(PathBuf),

    /// An input file is not well-formed JSON.
    #[error("malformed input in {path}: {reason}")]
    MalformedInput { path: PathBuf, reason: String },

    /// The collection/environment pairing failed a structural dry-run check.
    #[error("collection validation failed: {0}")]
    ValidationFailed(String),

    /// The external runner exited non-zero; the code is surfaced as-is.
    #[error("collection run failed (runner exit code {code})")]
    RunFailed { code: i32 },

    #[error("io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl OrchestratorError {
    /// Process exit code for this failure. A failed run propagates the
    /// runner's own exit code unchanged.
    pub fn exit_code(&self) -> i32 {
        match self {
            OrchestratorError::RunFailed { code } if *code > 0 => *code,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_failure_propagates_runner_exit_code() {
        let err = OrchestratorError::RunFailed { code: 7 };
        assert_eq!(err.exit_code(), 7);
    }

    #[test]
    fn fatal_errors_exit_one() {
        assert_eq!(OrchestratorError::ToolMissing("newman".into()).exit_code(), 1);
        assert_eq!(OrchestratorError::FileMissing("collection.json".into()).exit_code(), 1);
        // Exit code 0 from a "failed" run must never masquerade as success.
        assert_eq!(OrchestratorError::RunFailed { code: 0 }.exit_code(), 1);
    }
}
