//! External collection-runner invocation
//!
//! Builds the mode-specific argument set for the external runner and
//! executes it synchronously. The runner's exit code is never suppressed:
//! it travels back to the caller inside a typed [`RunOutcome`] so that
//! aggregating modes can inspect sub-results instead of losing them to
//! raw process propagation.

use std::process::Command;

use anyhow::{Context, Result};

use crate::cli::Output;
use crate::config::RunConfig;
use crate::reports::{self, ReportArtifact, ReportKind};

/// Execution modes understood by the run executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Stop on first failing assertion, short timeout.
    Basic,
    /// Multi-format report export (html + json), longer timeout.
    Detailed,
    /// Json-only export with a per-request delay to avoid rate limiting.
    Performance,
    /// Restrict execution to the critical-path subset of the collection.
    Smoke,
}

impl RunMode {
    pub fn label(&self) -> &'static str {
        match self {
            RunMode::Basic => "basic",
            RunMode::Detailed => "detailed",
            RunMode::Performance => "performance",
            RunMode::Smoke => "smoke",
        }
    }
}

/// A fully resolved runner invocation: program, arguments, and the report
/// artifacts the runner was asked to export.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub program: String,
    pub args: Vec<String>,
    pub artifacts: Vec<ReportArtifact>,
}

/// Typed result of one runner invocation.
#[derive(Debug)]
pub struct RunOutcome {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub artifacts: Vec<ReportArtifact>,
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

impl RunPlan {
    /// Build the invocation for a run mode. `ts` is the filename timestamp
    /// shared by every artifact this run exports.
    pub fn for_mode(mode: RunMode, config: &RunConfig, ts: &str) -> Self {
        let mut plan = Self::base(config);

        match mode {
            RunMode::Basic => {
                plan.push_timeout(config.timeouts.basic.as_millis());
                plan.args.push("--bail".to_string());
                plan.push_reporters(&["cli"]);
            }
            RunMode::Detailed => {
                plan.push_timeout(config.timeouts.detailed.as_millis());
                plan.push_reporters(&["cli", "htmlextra", "json"]);
                plan.push_export(config, ReportKind::Html, "htmlextra", ts);
                plan.push_export(config, ReportKind::Json, "json", ts);
            }
            RunMode::Performance => {
                plan.push_timeout(config.timeouts.performance.as_millis());
                plan.args.push("--delay-request".to_string());
                plan.args.push(config.timeouts.performance_delay.as_millis().to_string());
                plan.push_reporters(&["cli", "json"]);
                plan.push_export(config, ReportKind::PerformanceJson, "json", ts);
            }
            RunMode::Smoke => {
                plan.push_timeout(config.timeouts.basic.as_millis());
                plan.args.push("--folder".to_string());
                plan.args.push(config.smoke_folder.clone());
                plan.args.push("--bail".to_string());
                plan.push_reporters(&["cli"]);
            }
        }

        plan
    }

    /// Build a dry-run invocation: the runner parses and structurally
    /// checks the collection/environment pairing without issuing real
    /// network calls.
    pub fn dry_run(config: &RunConfig) -> Self {
        let mut plan = Self::base(config);
        plan.args.push("--dry-run".to_string());
        plan.push_reporters(&["cli"]);
        plan
    }

    fn base(config: &RunConfig) -> Self {
        let mut args = vec![
            "run".to_string(),
            config.collection.display().to_string(),
            "-e".to_string(),
            config.environment.display().to_string(),
        ];
        if let Some(key) = &config.api_key {
            args.push("--env-var".to_string());
            args.push(format!("api_key={}", key));
        }
        Self { program: config.runner_bin.clone(), args, artifacts: Vec::new() }
    }

    fn push_timeout(&mut self, millis: u128) {
        self.args.push("--timeout-request".to_string());
        self.args.push(millis.to_string());
    }

    fn push_reporters(&mut self, reporters: &[&str]) {
        self.args.push("-r".to_string());
        self.args.push(reporters.join(","));
    }

    fn push_export(&mut self, config: &RunConfig, kind: ReportKind, reporter: &str, ts: &str) {
        let path = reports::artifact_path(config, kind, ts);
        self.args.push(format!("--reporter-{}-export", reporter));
        self.args.push(path.display().to_string());
        self.artifacts.push(ReportArtifact { kind, path });
    }

    /// Execute the plan and wait for completion. Captured output is echoed
    /// so the runner's own assertion log stays visible.
    pub fn invoke(self, output: &Output) -> Result<RunOutcome> {
        tracing::debug!(program = %self.program, args = ?self.args, "invoking collection runner");

        let captured = Command::new(&self.program)
            .args(&self.args)
            .output()
            .with_context(|| format!("failed to launch runner `{}`", self.program))?;

        let stdout = String::from_utf8_lossy(&captured.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&captured.stderr).into_owned();
        if !stdout.is_empty() && !output.is_quiet() {
            print!("{}", stdout);
        }
        if !stderr.is_empty() {
            eprint!("{}", stderr);
        }

        // A signal-terminated runner has no exit code; treat it as failure.
        let exit_code = captured.status.code().unwrap_or(-1);
        Ok(RunOutcome { exit_code, stdout, stderr, artifacts: self.artifacts })
    }
}
